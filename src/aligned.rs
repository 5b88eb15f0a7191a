/*!
Contains the `AlignedSequence`, a read after alignment with its confidences carried through the gaps.
Gap positions have no confidence, which always compares below any real value.
Leading and trailing gaps can be re-labeled as "no data" since they only exist because the other read extends further.
*/

use log::trace;

use crate::ambiguity::{GAP, NO_DATA};
use crate::errors::{MergeError, Result};
use crate::read::{is_read_base, ConfidenceSequence};

/// An aligned read, bases over `ACGTN-.` with a confidence per non-gap position
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignedSequence {
    /// Aligned symbols
    bases: Vec<u8>,
    /// Confidence for each symbol, None for gaps and no-data positions
    confidences: Vec<Option<u8>>
}

impl AlignedSequence {
    /// Builds an aligned sequence directly, mostly for testing the voter.
    /// # Arguments
    /// * `bases` - the aligned symbols
    /// * `confidences` - the confidences, None where there is no base
    /// # Errors
    /// * if the lengths differ
    pub fn new(bases: Vec<u8>, confidences: Vec<Option<u8>>) -> Result<AlignedSequence> {
        if bases.len() != confidences.len() {
            return Err(MergeError::LengthMismatch {
                expected: bases.len(),
                found: confidences.len()
            });
        }
        Ok(AlignedSequence { bases, confidences })
    }

    /// Re-attaches the original confidences to a gapped alignment string.
    /// Each non-gap symbol consumes the next confidence from `original`, each gap gets None.
    /// # Arguments
    /// * `aligned` - the aligned string over `ACGTN-`
    /// * `original` - the ungapped sequence the alignment was built from
    /// # Errors
    /// * if a symbol is outside `ACGTN-`, or a base disagrees with the original read
    /// * if the number of non-gap symbols does not equal the original length
    pub fn reapply_confidences(aligned: &[u8], original: &ConfidenceSequence) -> Result<AlignedSequence> {
        let mut confidences: Vec<Option<u8>> = Vec::with_capacity(aligned.len());
        let mut original_index = 0;
        for (position, &symbol) in aligned.iter().enumerate() {
            if symbol == GAP {
                confidences.push(None);
                continue;
            }

            if !is_read_base(symbol) {
                return Err(MergeError::invalid_symbol(symbol, position));
            }

            match original.bases().get(original_index) {
                Some(&base) if base == symbol => {
                    confidences.push(Some(original.confidences()[original_index]));
                    original_index += 1;
                },
                Some(_) => return Err(MergeError::invalid_symbol(symbol, position)),
                None => {
                    // ran past the end, count the rest for a useful error
                    let non_gap = aligned.iter().filter(|&&s| s != GAP).count();
                    return Err(MergeError::LengthMismatch {
                        expected: original.len(),
                        found: non_gap
                    });
                }
            };
        }

        if original_index != original.len() {
            return Err(MergeError::LengthMismatch {
                expected: original.len(),
                found: original_index
            });
        }

        Ok(AlignedSequence {
            bases: aligned.to_vec(),
            confidences
        })
    }

    /// Converts the maximal leading and trailing runs of gaps into no-data markers.
    /// Interior gaps are left alone.
    pub fn mark_end_regions(&mut self) {
        let leading = self.bases.iter().take_while(|&&b| b == GAP).count();
        if leading == self.bases.len() {
            // nothing but gaps
            self.bases.iter_mut().for_each(|b| *b = NO_DATA);
            return;
        }
        let trailing = self.bases.iter().rev().take_while(|&&b| b == GAP).count();
        trace!("Marking end regions: leading={leading}, trailing={trailing}");

        let len = self.bases.len();
        self.bases[..leading].iter_mut().for_each(|b| *b = NO_DATA);
        self.bases[len - trailing..].iter_mut().for_each(|b| *b = NO_DATA);
    }

    // Getters
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn confidences(&self) -> &[Option<u8>] {
        &self.confidences
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Consumes self, returning the aligned symbols
    pub fn into_bases(self) -> Vec<u8> {
        self.bases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reapply_confidences() {
        let original = ConfidenceSequence::new(b"ACGT".to_vec(), vec![10, 20, 30, 40]).unwrap();
        let aligned = AlignedSequence::reapply_confidences(b"-AC-GT--", &original).unwrap();
        assert_eq!(aligned.bases(), b"-AC-GT--");
        assert_eq!(aligned.confidences(), &[None, Some(10), Some(20), None, Some(30), Some(40), None, None]);
    }

    #[test]
    fn test_reapply_length_mismatch() {
        let original = ConfidenceSequence::new(b"ACGT".to_vec(), vec![10, 20, 30, 40]).unwrap();

        // too few bases
        let err = AlignedSequence::reapply_confidences(b"A-CG", &original).unwrap_err();
        assert!(matches!(err, MergeError::LengthMismatch { expected: 4, found: 3 }));

        // too many bases
        let err = AlignedSequence::reapply_confidences(b"ACGTA", &original).unwrap_err();
        assert!(matches!(err, MergeError::LengthMismatch { expected: 4, found: 5 }));
    }

    #[test]
    fn test_reapply_invalid_symbol() {
        let original = ConfidenceSequence::new(b"ACGT".to_vec(), vec![10, 20, 30, 40]).unwrap();

        // not a base at all
        let err = AlignedSequence::reapply_confidences(b"AC*GT", &original).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBaseSymbol { symbol: '*', position: 2 }));

        // a base that was not in the read
        let err = AlignedSequence::reapply_confidences(b"ACCT", &original).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBaseSymbol { symbol: 'C', position: 2 }));

        // no-data markers are never produced by an aligner
        let err = AlignedSequence::reapply_confidences(b".ACGT", &original).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBaseSymbol { symbol: '.', position: 0 }));
    }

    #[test]
    fn test_mark_end_regions() {
        let original = ConfidenceSequence::new(b"ACGT".to_vec(), vec![10, 20, 30, 40]).unwrap();
        let mut aligned = AlignedSequence::reapply_confidences(b"--AC-GT---", &original).unwrap();
        aligned.mark_end_regions();
        assert_eq!(aligned.bases(), b"..AC-GT...");
        // confidences are untouched
        assert_eq!(aligned.confidences()[0], None);
        assert_eq!(aligned.confidences()[2], Some(10));

        // nothing to do
        let mut aligned = AlignedSequence::reapply_confidences(b"AC-GT", &original).unwrap();
        aligned.mark_end_regions();
        assert_eq!(aligned.bases(), b"AC-GT");
    }

    #[test]
    fn test_mark_all_gaps() {
        let mut aligned = AlignedSequence::new(b"----".to_vec(), vec![None; 4]).unwrap();
        aligned.mark_end_regions();
        assert_eq!(aligned.bases(), b"....");

        let mut aligned = AlignedSequence::default();
        aligned.mark_end_regions();
        assert!(aligned.is_empty());
    }
}
