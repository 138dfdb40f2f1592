use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed query expression.
///
/// Carries the byte offset of the offending input and a short
/// human-readable reason. Returned from `query_posts`; ingestion has no
/// user-visible failure mode.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} at offset {position}")]
pub struct ParseError {
    /// Byte offset into the query string.
    pub position: usize,
    /// Short human-readable reason.
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Main error type for postdex operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostdexError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias for postdex operations
pub type Result<T> = std::result::Result<T, PostdexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(4, "Need two operands for &");
        assert_eq!(err.to_string(), "Need two operands for & at offset 4");
    }

    #[test]
    fn test_parse_error_wraps_into_postdex_error() {
        let err: PostdexError = ParseError::new(0, "Unterminated string constant").into();
        assert_eq!(err.to_string(), "Unterminated string constant at offset 0");
    }
}
