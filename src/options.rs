//! Minimizer options.
//!
//! Options are resolved once before a run and never change mid-run. The four keep
//! toggles are independent; by default everything removable is removed.

use crate::error::MinimizeError;

/// Configuration for one minimization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Keep blank lines, collapsing runs of them to at most one.
    pub keep_blank_lines: bool,
    /// Keep comment lines and inline comments.
    pub keep_comments: bool,
    /// Keep string statements in documentation position.
    pub keep_docstrings: bool,
    /// Reproduce the original inter-token whitespace instead of re-spacing.
    pub keep_whitespace: bool,
    /// Separator character used wherever a space is required. Exactly one
    /// printable character.
    pub whitespace_char: String,
    /// Leading text emitted once per indentation level. Non-empty.
    pub indent_char: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            keep_blank_lines: false,
            keep_comments: false,
            keep_docstrings: false,
            keep_whitespace: false,
            whitespace_char: " ".to_string(),
            indent_char: "\t".to_string(),
        }
    }
}

impl Options {
    /// Check the character constraints. Called by the library entry point before
    /// any tokenization happens.
    pub fn validate(&self) -> Result<(), MinimizeError> {
        if self.whitespace_char.chars().count() != 1 {
            return Err(MinimizeError::InvalidOption(format!(
                "whitespace-char must be exactly one character, got {:?}",
                self.whitespace_char
            )));
        }
        if self.whitespace_char.chars().any(|c| c.is_control()) {
            return Err(MinimizeError::InvalidOption(format!(
                "whitespace-char must be printable, got {:?}",
                self.whitespace_char
            )));
        }
        if self.indent_char.is_empty() {
            return Err(MinimizeError::InvalidOption(
                "indent-char must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
