/*!
Contains the `ConfidenceSequence`, a called read where every base carries an integer confidence.
Values are immutable; trimming and re-orientation always produce a new sequence.

# Example usage
```rust
use readpair_con::read::ConfidenceSequence;

let read = ConfidenceSequence::new(
    b"AACGTT".to_vec(),
    vec![10, 50, 60, 30, 55, 12]
).unwrap();

// the high quality core keeps the dip at 30 because its neighbors outweigh it
let core = read.high_quality_segment(40);
assert_eq!(core.bases(), b"ACGT");
assert_eq!(core.mask_poor_bases(40), b"ACNT".to_vec());

// reverse complement flips the confidences too
let rc = core.reverse_complement();
assert_eq!(rc.bases(), b"ACGT");
assert_eq!(rc.confidences(), &[55, 30, 60, 50]);
```
*/

use crate::errors::{MergeError, Result};

/// The symbol used for a base without a usable call
pub const UNKNOWN_BASE: u8 = b'N';

/// Returns the complement of a single base, `N` maps to itself.
/// Symbols outside the read alphabet are returned unchanged.
#[inline]
pub const fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => base
    }
}

/// Returns true if the symbol is a valid called base
#[inline]
pub fn is_read_base(symbol: u8) -> bool {
    matches!(symbol, b'A' | b'C' | b'G' | b'T' | b'N')
}

/// A sequence of called bases with a parallel confidence per base
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfidenceSequence {
    /// The called bases, over ACGTN
    bases: Vec<u8>,
    /// The confidence for each called base, higher is better
    confidences: Vec<u8>
}

impl ConfidenceSequence {
    /// Creates a new sequence after checking the inputs.
    /// # Arguments
    /// * `bases` - the called bases, must be over ACGTN
    /// * `confidences` - the per-base confidences, must be the same length as `bases`
    /// # Errors
    /// * if the lengths differ
    /// * if any base is outside of ACGTN
    pub fn new(bases: Vec<u8>, confidences: Vec<u8>) -> Result<ConfidenceSequence> {
        if bases.len() != confidences.len() {
            return Err(MergeError::InvalidConfidenceLength {
                bases: bases.len(),
                confidences: confidences.len()
            });
        }

        if let Some(position) = bases.iter().position(|&b| !is_read_base(b)) {
            return Err(MergeError::invalid_symbol(bases[position], position));
        }

        Ok(ConfidenceSequence {
            bases,
            confidences
        })
    }

    /// Creates a sequence with the same confidence at every base.
    /// # Arguments
    /// * `bases` - the called bases, must be over ACGTN
    /// * `confidence` - the confidence assigned to every base
    /// # Errors
    /// * if any base is outside of ACGTN
    pub fn with_uniform_confidence(bases: &[u8], confidence: u8) -> Result<ConfidenceSequence> {
        Self::new(bases.to_vec(), vec![confidence; bases.len()])
    }

    /// Returns a new sequence for the half-open range `start..end`.
    /// Panics if the range is out of bounds, same as slicing.
    pub fn subsequence(&self, start: usize, end: usize) -> ConfidenceSequence {
        ConfidenceSequence {
            bases: self.bases[start..end].to_vec(),
            confidences: self.confidences[start..end].to_vec()
        }
    }

    /// Returns the reverse complement of this sequence, with confidences reversed to match.
    pub fn reverse_complement(&self) -> ConfidenceSequence {
        ConfidenceSequence {
            bases: self.bases.iter().rev().map(|&b| complement_base(b)).collect(),
            confidences: self.confidences.iter().rev().cloned().collect()
        }
    }

    /// Finds the high quality core of the read.
    /// Each base scores `confidence - threshold` and the maximum scoring contiguous segment is returned.
    /// This is the same cumulative scoring used for phred-style end trimming, but applied to both ends at once.
    /// The segment always starts and ends on a base above the threshold, so it is empty when no base qualifies.
    /// Interior low confidence bases are kept if the surrounding high quality bases outweigh them.
    /// # Arguments
    /// * `threshold` - confidences strictly above this value score positively
    pub fn high_quality_segment(&self, threshold: u8) -> ConfidenceSequence {
        let (start, end) = self.high_quality_bounds(threshold);
        self.subsequence(start, end)
    }

    /// Returns the half-open bounds of the high quality segment, see `high_quality_segment(...)`.
    /// Ties are resolved to the leftmost segment.
    pub fn high_quality_bounds(&self, threshold: u8) -> (usize, usize) {
        let threshold = i64::from(threshold);
        let mut best_score: i64 = 0;
        let mut best_bounds = (0, 0);

        let mut current_score: i64 = 0;
        let mut current_start = 0;
        for (i, &conf) in self.confidences.iter().enumerate() {
            if current_score <= 0 {
                // anything before this point can only hurt us
                current_score = 0;
                current_start = i;
            }
            current_score += i64::from(conf) - threshold;
            if current_score > best_score {
                best_score = current_score;
                best_bounds = (current_start, i + 1);
            }
        }
        best_bounds
    }

    /// Replaces every base with confidence at or below the threshold with `N`.
    /// # Arguments
    /// * `threshold` - bases need a confidence strictly above this to be kept
    pub fn mask_poor_bases(&self, threshold: u8) -> Vec<u8> {
        self.bases.iter().zip(self.confidences.iter())
            .map(|(&base, &conf)| if conf > threshold { base } else { UNKNOWN_BASE })
            .collect()
    }

    // Getters
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn confidences(&self) -> &[u8] {
        &self.confidences
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validation() {
        assert!(ConfidenceSequence::new(b"ACGTN".to_vec(), vec![1, 2, 3, 4, 5]).is_ok());

        let err = ConfidenceSequence::new(b"ACGT".to_vec(), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, MergeError::InvalidConfidenceLength { bases: 4, confidences: 3 }));

        let err = ConfidenceSequence::new(b"ACXT".to_vec(), vec![1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBaseSymbol { symbol: 'X', position: 2 }));

        // lower case is not part of the alphabet
        let err = ConfidenceSequence::with_uniform_confidence(b"acgt", 60).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBaseSymbol { symbol: 'a', position: 0 }));
    }

    #[test]
    fn test_reverse_complement() {
        let read = ConfidenceSequence::new(b"AACGN".to_vec(), vec![1, 2, 3, 4, 5]).unwrap();
        let rc = read.reverse_complement();
        assert_eq!(rc.bases(), b"NCGTT");
        assert_eq!(rc.confidences(), &[5, 4, 3, 2, 1]);

        // twice is a no-op
        assert_eq!(rc.reverse_complement(), read);
    }

    #[test]
    fn test_mask_poor_bases() {
        let read = ConfidenceSequence::new(b"ACGTA".to_vec(), vec![41, 40, 39, 60, 0]).unwrap();
        // exactly at the threshold gets masked
        assert_eq!(read.mask_poor_bases(40), b"ANNTN".to_vec());
        assert_eq!(read.mask_poor_bases(0), b"ACGTN".to_vec());
        assert_eq!(read.mask_poor_bases(0).len(), read.len());
    }

    #[test]
    fn test_high_quality_segment_simple() {
        // low tails on both sides
        let mut confidences = vec![10; 5];
        confidences.extend(vec![60; 19]);
        confidences.extend(vec![10; 7]);
        let bases = vec![b'A'; confidences.len()];
        let read = ConfidenceSequence::new(bases, confidences).unwrap();

        assert_eq!(read.high_quality_bounds(40), (5, 24));
        assert_eq!(read.high_quality_segment(40).len(), 19);
    }

    #[test]
    fn test_high_quality_segment_interior_dip() {
        // a short dip is bridged, a long one is not
        let confidences = vec![
            10, 60, 60, 30, 60, 60, 10, 10, 10, 10, 10, 10, 60, 60
        ];
        let bases = vec![b'C'; confidences.len()];
        let read = ConfidenceSequence::new(bases, confidences).unwrap();
        assert_eq!(read.high_quality_bounds(40), (1, 6));
    }

    #[test]
    fn test_high_quality_segment_ties_and_threshold() {
        // two equally good segments, the leftmost wins
        let read = ConfidenceSequence::new(b"ACGTAC".to_vec(), vec![50, 50, 0, 0, 50, 50]).unwrap();
        assert_eq!(read.high_quality_bounds(40), (0, 2));

        // values exactly at the threshold are not high quality and do not pad the ends
        let read = ConfidenceSequence::new(b"ACGTAC".to_vec(), vec![40, 40, 50, 40, 40, 40]).unwrap();
        assert_eq!(read.high_quality_bounds(40), (2, 3));

        // nothing qualifies
        let read = ConfidenceSequence::new(b"ACG".to_vec(), vec![40, 12, 0]).unwrap();
        assert!(read.high_quality_segment(40).is_empty());
        assert!(ConfidenceSequence::default().high_quality_segment(40).is_empty());
    }
}
