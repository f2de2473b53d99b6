//! Raw tokenization for the subject language.
//!
//! This module provides the raw tokenization using the logos lexer library. This is
//! the entry point where source strings become token streams; the logical-line
//! transformation operates on the stream produced here.
//!
//! String literals need more than a regex: the closing delimiter depends on the
//! opening one, and a backslash before the delimiter keeps the literal open even in
//! raw strings (as in the subject language's own tokenizer). The opening prefix and
//! quote are matched by regex and a callback scans forward to the matching close.

use logos::{Lexer, Logos};

/// Tokens produced by the raw lexer. Whitespace, newlines, and explicit line
/// continuations are kept as tokens here because the logical-line transformation
/// needs them; they never survive into the annotated stream.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Name,

    #[regex(r"0[bB][01_]+|0[oO][0-7_]+|0[xX][0-9a-fA-F_]+")]
    #[regex(r"(\d[\d_]*\.[\d_]*|\.\d[\d_]*|\d[\d_]*)([eE][+-]?\d[\d_]*)?[jJ]?")]
    Number,

    #[regex(r#"([rR][bBfF]|[bBfF][rR]|[rRbBuUfF])?("""|'''|"|')"#, lex_string)]
    Str,

    #[token("**=")]
    #[token("//=")]
    #[token(">>=")]
    #[token("<<=")]
    #[token("...")]
    #[token("**")]
    #[token("//")]
    #[token("<<")]
    #[token(">>")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("->")]
    #[token(":=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("@=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    #[token(",")]
    #[token(":")]
    #[token(".")]
    #[token(";")]
    #[token("@")]
    #[token("=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    #[token("<")]
    #[token(">")]
    Op,

    /// Backslash-newline: joins two physical lines into one.
    #[regex(r"\\\r?\n")]
    Continuation,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[ \t\x0c]+")]
    Whitespace,
}

/// Scan from the opening quote to the matching close.
///
/// The matched slice is the optional prefix plus the opening quote run, so the
/// delimiter can be read off its tail. A backslash always consumes the following
/// character; a bare newline terminates the scan for single-quoted literals.
/// Returns false for an unterminated literal, which logos surfaces as an error.
fn lex_string(lex: &mut Lexer<RawToken>) -> bool {
    let slice = lex.slice();
    let quote: &[u8] = if slice.ends_with("\"\"\"") {
        b"\"\"\""
    } else if slice.ends_with("'''") {
        b"'''"
    } else if slice.ends_with('"') {
        b"\""
    } else {
        b"'"
    };
    let triple = quote.len() == 3;
    let rem = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rem.len() {
        if rem[i] == b'\\' {
            i += 2;
        } else if !triple && (rem[i] == b'\n' || rem[i] == b'\r') {
            return false;
        } else if rem[i..].starts_with(quote) {
            lex.bump(i + quote.len());
            return true;
        } else {
            i += 1;
        }
    }
    false
}

/// A span the raw lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLexFault {
    pub span: logos::Span,
}

/// Tokenize source text, returning raw tokens paired with their byte spans.
///
/// Stops at the first fault; the caller translates the fault into the engine's
/// error vocabulary with line/column information.
pub fn tokenize(source: &str) -> Result<Vec<(RawToken, logos::Span)>, RawLexFault> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => return Err(RawLexFault { span: lexer.span() }),
        }
    }
    Ok(tokens)
}
