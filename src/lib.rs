//! # pymin
//!
//! Minimizes Python source code through its lexical token stream: blank lines,
//! comments, docstrings, and extraneous whitespace are removed while the output
//! stays lexically equivalent to the input (it re-tokenizes to the same content
//! tokens).
//!
//! The pipeline is: raw text -> [lexing] (logos pass plus logical-line
//! transformation) -> [grouping] (token groups per logical line) -> [docstring]
//! (positional detection) -> [emit] (spacing, indentation re-emission, assembly).
//!
//! The engine is single-pass, single-threaded, and synchronous; each call owns its
//! state, so concurrent calls over different files need no coordination.

pub mod docstring;
pub mod emit;
pub mod error;
pub mod events;
pub mod grouping;
pub mod lexing;
pub mod options;
pub mod spacing;
pub mod token;

pub use error::MinimizeError;
pub use events::{CountingSink, Event, EventSink};
pub use options::Options;

/// Minimize source text with the given options.
pub fn minimize(source: &str, options: &Options) -> Result<String, MinimizeError> {
    minimize_with_sink(source, options, None)
}

/// Minimize source text, reporting removal statistics to an optional event sink.
///
/// Options are validated before any tokenization is attempted. The engine never
/// repairs a malformed token stream; errors surface to the caller, and retrying
/// with the same input is pointless because the transformation is deterministic.
pub fn minimize_with_sink(
    source: &str,
    options: &Options,
    sink: Option<&dyn EventSink>,
) -> Result<String, MinimizeError> {
    options.validate()?;
    let source = lexing::ensure_source_ends_with_newline(source);
    let tokens = lexing::lex(&source)?;
    let groups = grouping::group_tokens(tokens)?;
    let docstrings = docstring::docstring_flags(&groups);
    Ok(emit::untokenize(&groups, &docstrings, options, sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_defaults() {
        let out = minimize("def f():\n    '''doc'''\n    return  1 + 2\n", &Options::default())
            .expect("minimizes");
        assert_eq!(out, "def f():\n\treturn 1+2\n");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(minimize("", &Options::default()).expect("minimizes"), "");
    }

    #[test]
    fn test_invalid_options_rejected_before_tokenization() {
        let opts = Options {
            indent_char: String::new(),
            ..Options::default()
        };
        // the source is malformed too; the option error must win
        assert!(matches!(
            minimize("x = (\n", &opts),
            Err(MinimizeError::InvalidOption(_))
        ));
    }
}
