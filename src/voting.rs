/*!
Two round per-position voting over a pair of aligned reads.

Round one decides whether a position is skipped: a gap vote wins when neither read is confident at that position.
Skipped positions accumulate as pending `N`s; a run of two or more is written out when voting resumes, while a lone skip is dropped.
Anything still pending at the end of the alignment is dropped.

Round two calls the base: each confident read contributes its base, and two agreeing reads also contribute when their combined confidence is enough.
The contributions are merged into an IUPAC code.
*/

use log::trace;

use crate::aligned::AlignedSequence;
use crate::ambiguity::{is_gap_symbol, AmbiguityTable, GAP};
use crate::errors::{MergeError, Result};
use crate::read::{is_read_base, UNKNOWN_BASE};

/// Runs both voting rounds and returns the consensus.
/// # Arguments
/// * `aligned1` - first read after alignment and end-region marking
/// * `aligned2` - second read, must be the same length as `aligned1`
/// * `quality_threshold` - confidences must be strictly above this to count
/// * `table` - the ambiguity table used to merge base votes
/// # Errors
/// * if the two aligned reads have different lengths
/// * if either contains a symbol outside `ACGTN-.`
pub fn vote(aligned1: &AlignedSequence, aligned2: &AlignedSequence, quality_threshold: u8, table: &AmbiguityTable) -> Result<Vec<u8>> {
    if aligned1.len() != aligned2.len() {
        return Err(MergeError::LengthMismatch {
            expected: aligned1.len(),
            found: aligned2.len()
        });
    }

    let threshold = Some(quality_threshold);
    let mut consensus: Vec<u8> = Vec::with_capacity(aligned1.len());
    let mut pending: usize = 0;

    let positions = aligned1.bases().iter().zip(aligned1.confidences().iter())
        .zip(aligned2.bases().iter().zip(aligned2.confidences().iter()))
        .enumerate();
    for (i, ((&base1, &conf1), (&base2, &conf2))) in positions {
        for base in [base1, base2] {
            if !is_read_base(base) && !is_gap_symbol(base) {
                return Err(MergeError::invalid_symbol(base, i));
            }
        }

        // round 1: skip when a real gap is present and nobody is confident
        if (base1 == GAP || base2 == GAP) && conf1.max(conf2) <= threshold {
            pending += 1;
            continue;
        }
        if pending > 1 {
            trace!("Flushing {pending} skipped positions before {i}");
            consensus.extend(std::iter::repeat(UNKNOWN_BASE).take(pending));
        }
        pending = 0;

        // round 2: collect the base votes
        let mut votes: Vec<u8> = Vec::with_capacity(2);
        if conf1 > threshold {
            votes.push(base1);
        }
        if conf2 > threshold {
            votes.push(base2);
        }
        if base1 == base2 && combined_confidence(conf1, conf2) > u32::from(quality_threshold) {
            votes.push(base1);
        }

        let call = table.call(&votes)?;
        trace!("{i}: {}/{conf1:?} {}/{conf2:?} => {}", base1 as char, base2 as char, call as char);
        consensus.push(call);
    }

    if pending > 0 {
        trace!("Dropping {pending} skipped positions at the end");
    }
    Ok(consensus)
}

/// Sum of two confidences, gaps contribute nothing
#[inline]
fn combined_confidence(conf1: Option<u8>, conf2: Option<u8>) -> u32 {
    conf1.map_or(0, u32::from) + conf2.map_or(0, u32::from)
}
