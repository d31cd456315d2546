//! Error types for the Kontor share reconstruction library

/// Error types for the Kontor share reconstruction library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareRecoveryError {
    /// A required field or delimiter could not be located in the document
    #[error("Missing section: '{section}' not found in document")]
    MissingSection { section: String },

    /// A share entry inside the keys collection is structurally broken
    #[error("Malformed share entry at byte {offset}: {reason}")]
    MalformedEntry { offset: usize, reason: String },

    /// A share key could not be read as an integer index
    #[error("Invalid share index: key \"{key}\" is not an integer")]
    InvalidShareIndex { key: String },

    /// A share declares a radix outside the supported range
    #[error("Invalid base: {base} (must be between {min} and {max})", min = crate::config::MIN_BASE, max = crate::config::MAX_BASE)]
    InvalidBase { base: String },

    /// A share value contains a character that is not a digit of its base
    #[error("Invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    /// `n` or `k` is non-numeric or not positive
    #[error("Invalid threshold parameter: {field} = {value} (must be a positive integer)")]
    InvalidThreshold { field: String, value: String },

    /// Fewer shares than the threshold requires
    #[error("Not enough shares: have {have}, need {need}")]
    InsufficientShares { have: usize, need: usize },

    /// The keys collection holds more entries than the share buffer admits
    #[error("Too many shares: document exceeds the limit of {max}")]
    TooManyShares { max: usize },

    /// Two points share an x coordinate, so interpolation is undefined
    #[error("Ill-formed point set: duplicate x coordinate {x}")]
    IllFormedPointSet { x: i64 },

    /// Input document exceeds the size limit
    #[error("Document too large: {size} bytes exceeds maximum {max} bytes")]
    DocumentTooLarge { size: usize, max: usize },

    /// IO operation failed
    #[error("IO error: {0}")]
    IO(String),
}

impl ShareRecoveryError {
    /// Whether this error describes a structural problem with the input document.
    pub fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            ShareRecoveryError::MissingSection { .. }
                | ShareRecoveryError::MalformedEntry { .. }
                | ShareRecoveryError::InvalidShareIndex { .. }
                | ShareRecoveryError::InvalidBase { .. }
                | ShareRecoveryError::TooManyShares { .. }
        )
    }

    pub(crate) fn missing(section: impl Into<String>) -> Self {
        ShareRecoveryError::MissingSection {
            section: section.into(),
        }
    }

    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        ShareRecoveryError::MalformedEntry {
            offset,
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for share reconstruction operations
pub type Result<T> = std::result::Result<T, ShareRecoveryError>;
