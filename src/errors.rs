use thiserror::Error;

/// Result type alias for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Errors that indicate malformed upstream data or a broken collaborator.
/// Note that "could not assemble this pair" is not an error, those outcomes are reported as `Ok(None)`.
#[derive(Error, Debug)]
pub enum MergeError {
    /// A symbol outside the accepted alphabet was encountered
    #[error("Invalid base symbol '{symbol}' at position {position}")]
    InvalidBaseSymbol {
        /// The offending symbol
        symbol: char,
        /// Index of the symbol in the sequence being processed
        position: usize
    },

    /// An aligned string does not line up with the sequence it was derived from
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// The length that was required
        expected: usize,
        /// The length that was observed
        found: usize
    },

    /// Bases and confidences were provided with different lengths
    #[error("Bases and confidences must be the same length: {bases} bases, {confidences} confidences")]
    InvalidConfidenceLength {
        /// Number of bases provided
        bases: usize,
        /// Number of confidences provided
        confidences: usize
    },

    /// The alignment adapter failed to produce an alignment
    #[error("Alignment unavailable: {0}")]
    AlignmentUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>)
}

impl MergeError {
    /// Convenience constructor for a bad symbol
    pub fn invalid_symbol(symbol: u8, position: usize) -> MergeError {
        MergeError::InvalidBaseSymbol { symbol: symbol as char, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MergeError::invalid_symbol(b'X', 3);
        assert_eq!(err.to_string(), "Invalid base symbol 'X' at position 3");

        let err = MergeError::LengthMismatch { expected: 10, found: 9 };
        assert_eq!(err.to_string(), "Length mismatch: expected 10, found 9");

        let err = MergeError::InvalidConfidenceLength { bases: 4, confidences: 3 };
        assert_eq!(err.to_string(), "Bases and confidences must be the same length: 4 bases, 3 confidences");
    }

    #[test]
    fn test_alignment_unavailable_source() {
        use std::error::Error;
        let inner: Box<dyn std::error::Error + Send + Sync> = From::from(simple_error::SimpleError::new("aligner crashed"));
        let err = MergeError::AlignmentUnavailable(inner);
        assert_eq!(err.to_string(), "Alignment unavailable: aligner crashed");
        assert_eq!(err.source().unwrap().to_string(), "aligner crashed");
    }
}
