//! Error types for signature parsing
//!
//! Parsing has a single failure kind, [`ParseError`]. Every variant records
//! where in the input the problem was detected so callers can point at it.

/// Failure to parse a signature, type list or single type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Unexpected '{found}' at position {position}: expected {expected}")]
    UnexpectedToken {
        found: String,
        position: usize,
        expected: &'static str,
    },

    #[error("Invalid function name '{found}' at position {position}")]
    InvalidIdentifier { found: String, position: usize },

    #[error("Unknown type '{name}' at position {position}")]
    UnknownType { name: String, position: usize },

    #[error("Invalid number '{digits}' at position {position}")]
    InvalidNumber { digits: String, position: usize },

    #[error("Invalid integer width {bits} at position {position}: must be a multiple of 8 in 8..=256")]
    InvalidWidth { bits: usize, position: usize },

    #[error("Trailing input '{remainder}' at position {position}")]
    TrailingInput { remainder: String, position: usize },

    /// Tuples plus array suffixes nested beyond the configured limit
    #[error("Nesting deeper than {limit} levels at position {position}")]
    DepthLimitExceeded { limit: usize, position: usize },

    #[error("Input of {length} bytes exceeds the limit of {limit}")]
    InputTooLong { length: usize, limit: usize },
}

impl ParseError {
    /// Byte offset of the failure, when one applies
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::InvalidIdentifier { position, .. }
            | ParseError::UnknownType { position, .. }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::InvalidWidth { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::DepthLimitExceeded { position, .. } => Some(*position),
            ParseError::UnexpectedEnd { .. } | ParseError::InputTooLong { .. } => None,
        }
    }
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
