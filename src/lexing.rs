//! Tokenizer for the subject language (Python).
//!
//! This module orchestrates the complete tokenization pipeline that feeds the
//! minimization engine.
//!
//! The pipeline consists of:
//! 1. Raw tokenization using the logos lexer ([base_tokenization])
//! 2. Logical-line transformation ([logical_lines]): indentation becomes semantic
//!    Indent/Dedent tokens, physical line ends become Newline or Nl depending on
//!    bracket depth and line content, and the stream is closed with one EndMarker.
//!
//! Indentation Handling
//!
//!     The logos pass only records whitespace runs; it knows nothing about block
//!     structure. The logical-line transformation measures the leading whitespace of
//!     each physical line (tabs advance to the next multiple of 8, as the subject
//!     language's own tokenizer does) and maintains a stack of widths, emitting one
//!     Indent or Dedent token per level change. Keeping this out of the raw lexer
//!     means the logos grammar stays vanilla and the block logic lives in one place.
//!
//! The transformation validates the stream as it goes: bracket depth may never go
//! negative, a dedent must land on a width already on the stack, every bracket must
//! be closed by end of input. Violations surface as
//! [MinimizeError::MalformedTokenStream]; characters the raw lexer cannot place
//! surface as [MinimizeError::UnsupportedToken].

pub mod base_tokenization;
pub mod logical_lines;

pub use base_tokenization::{tokenize, RawToken};
pub use logical_lines::annotate;

use crate::error::MinimizeError;
use crate::token::Token;
use logical_lines::LineMap;

/// Preprocesses source text to ensure it ends with a newline.
///
/// The transformation synthesizes trailing dedents and the end marker at the final
/// newline, so a source without one would otherwise lose its last logical line end.
/// Returns the original string if it already ends with a newline or is empty.
pub fn ensure_source_ends_with_newline(source: &str) -> String {
    if !source.is_empty() && !source.ends_with('\n') {
        format!("{}\n", source)
    } else {
        source.to_string()
    }
}

/// Full tokenizer pipeline: raw logos pass, then logical-line annotation.
///
/// The returned stream satisfies the engine's contract: ordered, finite, terminated
/// by exactly one EndMarker, with well-formed Indent/Dedent nesting and the
/// Newline-vs-Nl distinction reflecting bracket depth.
pub fn lex(source: &str) -> Result<Vec<Token>, MinimizeError> {
    match base_tokenization::tokenize(source) {
        Ok(raw) => logical_lines::annotate(&raw, source),
        Err(fault) => Err(fault_to_error(source, fault.span)),
    }
}

/// Turn a raw lexer fault into the engine's error vocabulary. A fault whose slice
/// begins like a string literal is an unterminated string; anything else is a
/// character no rule matches.
fn fault_to_error(source: &str, span: logos::Span) -> MinimizeError {
    let map = LineMap::new(source);
    let pos = map.position(span.start.min(source.len()));
    let slice = &source[span.start.min(source.len())..];
    let unprefixed = slice.trim_start_matches(|c| "rRbBuUfF".contains(c));
    if unprefixed.starts_with('\'') || unprefixed.starts_with('"') {
        MinimizeError::MalformedTokenStream(format!(
            "unterminated string literal at line {} column {}",
            pos.line, pos.column
        ))
    } else {
        MinimizeError::UnsupportedToken(format!(
            "unrecognized character {:?} at line {} column {}",
            slice.chars().next().unwrap_or('\0'),
            pos.line,
            pos.column
        ))
    }
}
