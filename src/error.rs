//! Error types for the minimizer.
//!
//! The engine never repairs a malformed token stream and never retries; every error
//! here is fatal for the single input being minimized. The batch driver decides
//! whether one file's failure aborts the run.

use std::fmt;

/// Errors that can occur while minimizing one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    /// The token stream is inconsistent: unbalanced brackets, an unmatched dedent,
    /// an unterminated string literal, or a missing end marker.
    MalformedTokenStream(String),
    /// A character or token the tokenizer cannot place into any category.
    UnsupportedToken(String),
    /// An option violates its constraint (empty indent string, multi-character
    /// whitespace character). Raised before any tokenization is attempted.
    InvalidOption(String),
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::MalformedTokenStream(msg) => {
                write!(f, "Malformed token stream: {}", msg)
            }
            MinimizeError::UnsupportedToken(msg) => write!(f, "Unsupported token: {}", msg),
            MinimizeError::InvalidOption(msg) => write!(f, "Invalid option: {}", msg),
        }
    }
}

impl std::error::Error for MinimizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MinimizeError::MalformedTokenStream("bracket depth went negative".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed token stream: bracket depth went negative"
        );
        let err = MinimizeError::InvalidOption("indent-char is empty".to_string());
        assert_eq!(err.to_string(), "Invalid option: indent-char is empty");
    }
}
