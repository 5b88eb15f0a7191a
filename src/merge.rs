/*!
This module provides the `ReadMerger`, which reconciles a forward read and a reverse-strand read into one consensus.

The high quality core of each read is extracted first, and read 2 is reverse complemented to match read 1.
If neither core is long enough, the pair cannot be assembled.
If only one is long enough, that read stands alone provided it is not too ambiguous.
Otherwise the cores are aligned, confidences are carried through the alignment, the unsequenced ends are marked, and the reads vote on each position.

# Example usage
```rust
use readpair_con::merge::ReadMerger;
use readpair_con::merge_config::MergeConfigBuilder;
use readpair_con::read::ConfidenceSequence;

// read 2 comes off the opposite strand
let read1 = ConfidenceSequence::with_uniform_confidence(b"GATTACAGATTACA", 60).unwrap();
let read2 = read1.reverse_complement();

let merger = ReadMerger::with_config(
    MergeConfigBuilder::default()
        .min_segment_len(10)
        .build().unwrap()
);
let result = merger.merge(&read1, &read2).unwrap().unwrap();
assert_eq!(result.consensus(), b"GATTACAGATTACA");
assert_eq!(result.aligned1(), b"GATTACAGATTACA");
assert_eq!(result.aligned2(), b"GATTACAGATTACA");
```
*/

use log::debug;
use rayon::prelude::*;

use crate::aligned::AlignedSequence;
use crate::alignment::{LocalAffineAligner, PairwiseAligner};
use crate::ambiguity::{AmbiguityTable, GAP};
use crate::errors::{MergeError, Result};
use crate::merge_config::MergeConfig;
use crate::read::{ConfidenceSequence, UNKNOWN_BASE};
use crate::voting::vote;

/// Which reads contributed to a merge result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeSource {
    /// Both reads were aligned and voted
    Pair,
    /// Only read 1 was usable
    Read1,
    /// Only read 2 was usable
    Read2
}

/// Contains a successful merge
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeResult {
    /// The consensus call, over ACGT plus IUPAC ambiguity codes
    consensus: Vec<u8>,
    /// Read 1 as aligned, over `ACGTN-.`
    aligned1: Vec<u8>,
    /// Read 2 as aligned and reverse complemented, over `ACGTN-.`
    aligned2: Vec<u8>,
    /// Which reads the result came from
    source: MergeSource
}

impl MergeResult {
    /// Constructor
    pub fn new(consensus: Vec<u8>, aligned1: Vec<u8>, aligned2: Vec<u8>, source: MergeSource) -> MergeResult {
        MergeResult {
            consensus,
            aligned1,
            aligned2,
            source
        }
    }

    /// True if one of the reads was unusable and the other stands alone
    pub fn is_single_read(&self) -> bool {
        self.source != MergeSource::Pair
    }

    /// Number of consensus positions that are not a definite A, C, G, or T
    pub fn ambiguous_count(&self) -> usize {
        self.consensus.iter()
            .filter(|&&b| !matches!(b, b'A' | b'C' | b'G' | b'T'))
            .count()
    }

    // Getters
    pub fn consensus(&self) -> &[u8] {
        &self.consensus
    }

    pub fn aligned1(&self) -> &[u8] {
        &self.aligned1
    }

    pub fn aligned2(&self) -> &[u8] {
        &self.aligned2
    }

    pub fn source(&self) -> MergeSource {
        self.source
    }
}

/// Merges read pairs into a consensus.
/// Holds no per-merge state, so one merger can serve any number of pairs, including in parallel.
#[derive(Debug)]
pub struct ReadMerger<A: PairwiseAligner = LocalAffineAligner> {
    /// The config for merging
    config: MergeConfig,
    /// Performs the pairwise local alignment
    aligner: A
}

impl Default for ReadMerger {
    fn default() -> Self {
        Self::with_config(MergeConfig::default())
    }
}

impl ReadMerger {
    /// Creates a merger that uses the built-in local aligner with the scoring from `config`.
    /// # Arguments
    /// * `config` - the merge settings
    pub fn with_config(config: MergeConfig) -> ReadMerger {
        let aligner = LocalAffineAligner::new(config.scoring);
        ReadMerger { config, aligner }
    }
}

impl<A: PairwiseAligner> ReadMerger<A> {
    /// Creates a merger with a custom aligner.
    /// Note that `config.scoring` is only used by the built-in aligner.
    /// # Arguments
    /// * `config` - the merge settings
    /// * `aligner` - the alignment adapter to use
    pub fn with_aligner(config: MergeConfig, aligner: A) -> ReadMerger<A> {
        ReadMerger { config, aligner }
    }

    /// Merges a forward read with a read from the opposite strand.
    /// Returns `Ok(None)` when the pair cannot be assembled: both reads lack a long enough high quality core,
    /// or only one read is usable and too much of it is ambiguous.
    /// # Arguments
    /// * `read1` - the forward read
    /// * `read2` - the reverse-strand read, as sequenced; it gets reverse complemented here
    /// # Errors
    /// * `AlignmentUnavailable` if the aligner fails
    /// * `LengthMismatch` or `InvalidBaseSymbol` if the aligner output does not match its inputs
    pub fn merge(&self, read1: &ConfidenceSequence, read2: &ConfidenceSequence) -> Result<Option<MergeResult>> {
        let threshold = self.config.quality_threshold;
        let min_len = self.config.min_segment_len;

        let h1 = read1.high_quality_segment(threshold);
        let h2 = read2.high_quality_segment(threshold).reverse_complement();
        debug!("High quality segments: read1={} / {}, read2={} / {}", h1.len(), read1.len(), h2.len(), read2.len());

        let usable1 = h1.len() >= min_len;
        let usable2 = h2.len() >= min_len;
        match (usable1, usable2) {
            (false, false) => {
                debug!("Neither read has a high quality segment of length {min_len}");
                return Ok(None);
            },
            (true, false) => return Ok(self.single_read(&h1, MergeSource::Read1)),
            (false, true) => return Ok(self.single_read(&h2, MergeSource::Read2)),
            (true, true) => {}
        };

        let (raw1, raw2) = self.aligner.align(h1.bases(), h2.bases())
            .map_err(MergeError::AlignmentUnavailable)?;
        if raw1.len() != raw2.len() {
            return Err(MergeError::LengthMismatch {
                expected: raw1.len(),
                found: raw2.len()
            });
        }
        debug!("Alignment length: {}", raw1.len());

        let mut aligned1 = AlignedSequence::reapply_confidences(&raw1, &h1)?;
        let mut aligned2 = AlignedSequence::reapply_confidences(&raw2, &h2)?;
        aligned1.mark_end_regions();
        aligned2.mark_end_regions();

        let consensus = vote(&aligned1, &aligned2, threshold, AmbiguityTable::global())?;
        debug!("Consensus length: {}", consensus.len());

        Ok(Some(MergeResult::new(
            consensus,
            aligned1.into_bases(),
            aligned2.into_bases(),
            MergeSource::Pair
        )))
    }

    /// Merges many independent pairs in parallel.
    /// The results are in the same order as the input pairs.
    /// # Arguments
    /// * `pairs` - the (read1, read2) pairs, with the same orientation rules as `merge(...)`
    pub fn merge_batch(&self, pairs: &[(ConfidenceSequence, ConfidenceSequence)]) -> Vec<Result<Option<MergeResult>>> {
        pairs.par_iter()
            .map(|(read1, read2)| self.merge(read1, read2))
            .collect()
    }

    /// Builds the result when only one read is usable.
    /// The usable read is masked at low confidence and rejected if it is too ambiguous.
    /// # Arguments
    /// * `segment` - the high quality segment of the usable read, already oriented
    /// * `source` - which read this is, controls the output slot
    fn single_read(&self, segment: &ConfidenceSequence, source: MergeSource) -> Option<MergeResult> {
        let masked = segment.mask_poor_bases(self.config.quality_threshold);
        let unknown_count = masked.iter().filter(|&&b| b == UNKNOWN_BASE).count();
        let unknown_fraction = unknown_count as f64 / masked.len() as f64;
        if unknown_fraction > self.config.max_ambiguous_fraction {
            debug!("Only {source:?} is usable, but {unknown_count} / {} bases are ambiguous", masked.len());
            return None;
        }
        debug!("Only {source:?} is usable, returning its masked segment");

        let gaps = vec![GAP; segment.len()];
        let bases = segment.bases().to_vec();
        let (aligned1, aligned2) = match source {
            MergeSource::Read2 => (gaps, bases),
            _ => (bases, gaps)
        };
        Some(MergeResult::new(masked, aligned1, aligned2, source))
    }

    // Getters
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }
}
