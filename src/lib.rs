/*!
# readpair_con
This library merges two quality-annotated reads of the same DNA fragment, one forward and one from the opposite strand, into a single consensus.
Positions where the reads disagree, or where neither is reliable, are reported with IUPAC ambiguity codes.

Key steps:
* Each read is trimmed to its high quality core; read 2 is reverse complemented to match read 1
* If only one read has a usable core, it stands alone with its low confidence bases masked to `N`
* Otherwise the cores are aligned locally with affine gaps, and the reads vote on each aligned position

Alignment gaps and "no data" are kept apart: gaps at the ends of an alignment only mean the read was never sequenced that far, so they are marked with `.` and never vote.

# Example usage
```rust
use readpair_con::merge::ReadMerger;
use readpair_con::read::ConfidenceSequence;

let template = b"ACGGTCATTGCAGGCTAACGTTCAGGAT";
let read1 = ConfidenceSequence::with_uniform_confidence(&template[..24], 60).unwrap();

// read 2 disagrees at one position and comes off the other strand
let mut variant = template[4..].to_vec();
variant[2] = b'G';
let read2 = ConfidenceSequence::with_uniform_confidence(&variant, 60).unwrap().reverse_complement();

let merger = ReadMerger::default();
let result = merger.merge(&read1, &read2).unwrap().unwrap();
assert_eq!(result.consensus(), b"ACGGTCRTTGCAGGCTAACGTTCAGGAT");
assert_eq!(result.aligned1(), b"ACGGTCATTGCAGGCTAACGTTCA....");
assert_eq!(result.aligned2(), b"....TCGTTGCAGGCTAACGTTCAGGAT");
```
*/

/// Built-in local aligner and the adapter trait for plugging in others
pub mod alignment;
/// Aligned reads with confidences carried through the gaps
pub mod aligned;
/// IUPAC ambiguity code table
pub mod ambiguity;
/// Error types for merging
pub mod errors;
/// Utility for generating examples
pub mod example_gen;
/// Main functionality for merging a read pair
pub mod merge;
/// Configuration for ReadMerger
pub mod merge_config;
/// Reads with per-base confidence
pub mod read;
/// Per-position consensus voting
pub mod voting;
