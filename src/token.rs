//! Token types shared across the tokenizer, the grouping pass, and the emitter.
//!
//!     pymin opts for handling more complexity in the lexing stage in order to keep the
//!     minimization passes very simple. The tokenizer resolves indentation, bracket
//!     continuation, and string prefixes up front, so the later passes only ever see the
//!     closed set of kinds below.
//!
//! Token Layers
//!
//!     Raw Tokens:
//!         Character/word level tokens produced by the logos lexer. See
//!         [base_tokenization](crate::lexing::base_tokenization). Whitespace and explicit
//!         line continuations exist only at this layer.
//!
//!     Annotated Tokens:
//!         The [Token] values defined here, produced by the logical-line transformation.
//!         Indent/Dedent are semantic tokens for indentation level changes, similar to
//!         open/close braces in more c-style languages. Newline ends a logical line; Nl
//!         ends a physical line that does not end a statement (blank line, comment-only
//!         line, or a line inside open brackets). Exactly one EndMarker closes the stream.

use serde::Serialize;

/// The closed set of annotated token kinds.
///
/// Keywords are not distinguished from other names; the spacing table treats every
/// NAME as potentially a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Name,
    Number,
    Str,
    Op,
    Comment,
    /// Logical line end at bracket depth zero.
    Newline,
    /// Physical line end that does not terminate a statement.
    Nl,
    Indent,
    Dedent,
    EndMarker,
}

/// A line/column pair. Lines are 1-based, columns are 0-based character offsets,
/// matching the convention of CPython's tokenize module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// One annotated token. Immutable once produced; the minimization passes filter and
/// re-annotate via side tables, they never mutate tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal source slice. Empty for synthetic tokens (Indent, Dedent, EndMarker).
    pub text: String,
    pub start: Position,
    pub end: Position,
    /// Index of the logical line (statement) this token belongs to.
    pub logical_line: usize,
}

impl Token {
    pub fn is_content(&self) -> bool {
        matches!(classify(self), Category::Content)
    }
}

/// Category a token falls into for the purposes of grouping and emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Indent, Dedent, logical-newline, end-marker.
    Structural,
    /// Names, numbers, strings, operators.
    Content,
    Comment,
    /// An Nl token, the blank-line marker.
    BlankLine,
}

/// Classify a token. Pure, stateless; every kind maps to exactly one category.
///
/// TokenKind is a closed enum, so this match is exhaustive by construction. If a
/// kind is ever added, the compiler forces a decision here instead of letting an
/// unknown kind fall through silently.
pub fn classify(token: &Token) -> Category {
    match token.kind {
        TokenKind::Name | TokenKind::Number | TokenKind::Str | TokenKind::Op => Category::Content,
        TokenKind::Comment => Category::Comment,
        TokenKind::Nl => Category::BlankLine,
        TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::EndMarker => {
            Category::Structural
        }
    }
}

#[cfg(test)]
pub(crate) fn mk(kind: TokenKind, text: &str) -> Token {
    Token {
        kind,
        text: text.to_string(),
        start: Position::new(1, 0),
        end: Position::new(1, text.chars().count()),
        logical_line: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_content() {
        assert_eq!(classify(&mk(TokenKind::Name, "x")), Category::Content);
        assert_eq!(classify(&mk(TokenKind::Number, "1")), Category::Content);
        assert_eq!(classify(&mk(TokenKind::Str, "'a'")), Category::Content);
        assert_eq!(classify(&mk(TokenKind::Op, "+")), Category::Content);
    }

    #[test]
    fn test_classify_structural() {
        assert_eq!(classify(&mk(TokenKind::Newline, "\n")), Category::Structural);
        assert_eq!(classify(&mk(TokenKind::Indent, "")), Category::Structural);
        assert_eq!(classify(&mk(TokenKind::Dedent, "")), Category::Structural);
        assert_eq!(classify(&mk(TokenKind::EndMarker, "")), Category::Structural);
    }

    #[test]
    fn test_classify_trivia() {
        assert_eq!(classify(&mk(TokenKind::Comment, "# c")), Category::Comment);
        assert_eq!(classify(&mk(TokenKind::Nl, "\n")), Category::BlankLine);
    }
}
