/*!
The alignment adapter boundary and the built-in affine gap local aligner.

# Example usage
```rust
use readpair_con::alignment::{LocalAffineAligner, PairwiseAligner};

let aligner = LocalAffineAligner::default();
let (a1, a2) = aligner.align(b"TTACGTACGT", b"ACGTACGTCC").unwrap();
assert_eq!(a1, b"TTACGTACGT--".to_vec());
assert_eq!(a2, b"--ACGTACGTCC".to_vec());
```
*/

use log::trace;
use simple_error::bail;

use crate::ambiguity::GAP;

/// Errors from an aligner are opaque to the merge, they get wrapped on the way out
pub type AlignerError = Box<dyn std::error::Error + Send + Sync>;

/// Boundary to whatever performs the pairwise local alignment.
/// Implementations must return two equal length strings over `ACGTN-` where removing the gaps recovers each input exactly.
/// When multiple alignments score equally, the implementation picks one by its own rules.
pub trait PairwiseAligner: Send + Sync {
    /// Aligns two base strings.
    /// # Arguments
    /// * `seq_a` - the first sequence, no gaps
    /// * `seq_b` - the second sequence, no gaps
    /// # Errors
    /// * implementation specific
    fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<(Vec<u8>, Vec<u8>), AlignerError>;
}

/// Scoring model for the affine gap aligner.
/// A gap of length `k` costs `gap_open + (k-1) * gap_extend`, so `gap_open` is the full cost of a single-base gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffineScoring {
    /// Score for two identical symbols, must be positive
    pub match_score: i32,
    /// Score for two different symbols
    pub mismatch_score: i32,
    /// Cost of the first position in a gap, must be <= 0
    pub gap_open: i32,
    /// Cost of each additional position in a gap, must be <= 0
    pub gap_extend: i32
}

impl Default for AffineScoring {
    fn default() -> Self {
        Self {
            // identity scoring, a match is worth one and a mismatch nothing
            match_score: 1,
            mismatch_score: 0,
            // extension is harsher than opening so indels stay clumped instead of scattered
            gap_open: -5,
            gap_extend: -10
        }
    }
}

// big enough to never win, small enough to never overflow when a penalty is added
const NEG_INF: i32 = i32::MIN / 4;
/// Largest magnitude accepted for any single score, keeps gap extensions from `NEG_INF` in range
pub const MAX_SCORE_MAGNITUDE: i32 = 1 << 16;

/// Which matrix the traceback is currently walking
#[derive(Clone, Copy, Debug, PartialEq)]
enum TraceState {
    /// In the best-score matrix, which may step diagonally or drop into a gap
    Best,
    /// Ends in a gap in `seq_a`, consuming `seq_b`
    GapInA,
    /// Ends in a gap in `seq_b`, consuming `seq_a`
    GapInB
}

/// Smith-Waterman local alignment with affine gaps (Gotoh), O(n*m) time and memory.
/// The local hit is reported over the full inputs: unaligned prefixes are stacked right-aligned against the start of the hit,
/// unaligned suffixes are stacked left-aligned against its end, and only the leftover of the longer flank is padded with gaps.
#[derive(Clone, Debug, Default)]
pub struct LocalAffineAligner {
    scoring: AffineScoring
}

impl LocalAffineAligner {
    /// Creates a new aligner with the given scoring
    pub fn new(scoring: AffineScoring) -> LocalAffineAligner {
        LocalAffineAligner { scoring }
    }

    pub fn scoring(&self) -> AffineScoring {
        self.scoring
    }

    #[inline]
    fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b { self.scoring.match_score } else { self.scoring.mismatch_score }
    }
}

impl PairwiseAligner for LocalAffineAligner {
    fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<(Vec<u8>, Vec<u8>), AlignerError> {
        let scoring = self.scoring;
        if scoring.match_score <= 0 {
            bail!("Match score must be positive for local alignment, got {}", scoring.match_score);
        }
        if scoring.gap_open > 0 || scoring.gap_extend > 0 {
            bail!("Gap costs must not be positive, got open={} extend={}", scoring.gap_open, scoring.gap_extend);
        }
        let scores = [scoring.match_score, scoring.mismatch_score, scoring.gap_open, scoring.gap_extend];
        if scores.iter().any(|s| s.unsigned_abs() > MAX_SCORE_MAGNITUDE.unsigned_abs()) {
            bail!("Scores must be within +/-{MAX_SCORE_MAGNITUDE}, got {scoring:?}");
        }

        let n = seq_a.len();
        let m = seq_b.len();
        let width = m + 1;
        let index = |i: usize, j: usize| i * width + j;

        // h = best ending at (i, j); e = ending in a gap in A; f = ending in a gap in B
        let mut h: Vec<i32> = vec![0; (n + 1) * width];
        let mut e: Vec<i32> = vec![NEG_INF; (n + 1) * width];
        let mut f: Vec<i32> = vec![NEG_INF; (n + 1) * width];

        let mut best_score = 0;
        let mut best_cell = (0, 0);
        for i in 1..=n {
            for j in 1..=m {
                let e_val = (h[index(i, j - 1)] + scoring.gap_open).max(e[index(i, j - 1)] + scoring.gap_extend);
                let f_val = (h[index(i - 1, j)] + scoring.gap_open).max(f[index(i - 1, j)] + scoring.gap_extend);
                let diag = h[index(i - 1, j - 1)] + self.substitution(seq_a[i - 1], seq_b[j - 1]);
                let h_val = diag.max(e_val).max(f_val).max(0);

                e[index(i, j)] = e_val;
                f[index(i, j)] = f_val;
                h[index(i, j)] = h_val;

                // strictly greater keeps the first maximum in row-major order
                if h_val > best_score {
                    best_score = h_val;
                    best_cell = (i, j);
                }
            }
        }
        trace!("Local alignment best score {} at {:?}", best_score, best_cell);

        // trace back from the best cell until the local alignment starts
        let (end_i, end_j) = best_cell;
        let (mut i, mut j) = best_cell;
        let mut state = TraceState::Best;
        let mut rev_a: Vec<u8> = vec![];
        let mut rev_b: Vec<u8> = vec![];
        loop {
            match state {
                TraceState::Best => {
                    let h_val = h[index(i, j)];
                    if i == 0 || j == 0 || h_val == 0 {
                        break;
                    }
                    if h_val == h[index(i - 1, j - 1)] + self.substitution(seq_a[i - 1], seq_b[j - 1]) {
                        rev_a.push(seq_a[i - 1]);
                        rev_b.push(seq_b[j - 1]);
                        i -= 1;
                        j -= 1;
                    } else if h_val == e[index(i, j)] {
                        state = TraceState::GapInA;
                    } else {
                        state = TraceState::GapInB;
                    }
                },
                TraceState::GapInA => {
                    let opened = e[index(i, j)] == h[index(i, j - 1)] + scoring.gap_open;
                    rev_a.push(GAP);
                    rev_b.push(seq_b[j - 1]);
                    j -= 1;
                    if opened {
                        state = TraceState::Best;
                    }
                },
                TraceState::GapInB => {
                    let opened = f[index(i, j)] == h[index(i - 1, j)] + scoring.gap_open;
                    rev_a.push(seq_a[i - 1]);
                    rev_b.push(GAP);
                    i -= 1;
                    if opened {
                        state = TraceState::Best;
                    }
                }
            };
        }
        let (start_i, start_j) = (i, j);

        // prefixes are right-aligned against the local start
        let prefix_len = start_i.max(start_j);
        let mut aligned_a: Vec<u8> = Vec::with_capacity(n + m);
        let mut aligned_b: Vec<u8> = Vec::with_capacity(n + m);
        aligned_a.extend(std::iter::repeat(GAP).take(prefix_len - start_i));
        aligned_a.extend_from_slice(&seq_a[..start_i]);
        aligned_b.extend(std::iter::repeat(GAP).take(prefix_len - start_j));
        aligned_b.extend_from_slice(&seq_b[..start_j]);

        // the local hit itself
        aligned_a.extend(rev_a.iter().rev());
        aligned_b.extend(rev_b.iter().rev());

        // suffixes are left-aligned against the local end
        let suffix_a = &seq_a[end_i..];
        let suffix_b = &seq_b[end_j..];
        let suffix_len = suffix_a.len().max(suffix_b.len());
        aligned_a.extend_from_slice(suffix_a);
        aligned_a.extend(std::iter::repeat(GAP).take(suffix_len - suffix_a.len()));
        aligned_b.extend_from_slice(suffix_b);
        aligned_b.extend(std::iter::repeat(GAP).take(suffix_len - suffix_b.len()));

        assert_eq!(aligned_a.len(), aligned_b.len());
        Ok((aligned_a, aligned_b))
    }
}
