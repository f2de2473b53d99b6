//! The spacing decision table.
//!
//! Given two tokens that will end up adjacent in the output, decide whether a
//! separator is mandatory to preserve lexical identity. This is the single most
//! safety-critical contract in the crate: a false "no space needed" silently
//! changes the token stream, while a false "space needed" only costs a byte.
//! Every rule below therefore breaks ties toward inserting a space.
//!
//! The rules, applied first match wins:
//! 1. Two alphanumeric-leading tokens (names, numbers, keywords-as-names) always
//!    need a space; `return x` must not become `returnx` and `1 2` must not
//!    become `12`.
//! 2. A name directly before a string needs a space when the name is a valid
//!    string prefix (`r'x'` would absorb it) or when the string carries prefix
//!    letters of its own (`foo` next to `f'x'` would retokenize as `foof`
//!    `'x'`); `foo'x'` stays two tokens. A number before a prefixed string is
//!    spaced for the same reason: the prefix letters b and f are hex digits,
//!    so `0x1f` next to `f'x'` would retokenize as `0x1ff` `'x'`.
//! 3. Two operators need a space when their concatenation equals or begins a
//!    longer operator (`*` `*` would fuse into `**`; a dot pair could begin
//!    `...`).
//! 4. A dot operator before a digit-leading number, or a number before a
//!    dot-leading operator, would fuse into a float literal.
//! 5. Two strings whose boundary quote characters match could open a
//!    triple-quote delimiter.
//! 6. Everything else packs tight.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::token::{Token, TokenKind};

/// Multi-character operators of the subject language. Single-character operators
/// never participate in fusion checks because a concatenation of two tokens is
/// always at least two characters long.
const MULTI_CHAR_OPS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "->", ":=", "**", "//", "<<", ">>", "<=", ">=", "==",
    "!=", "+=", "-=", "*=", "/=", "%=", "@=", "&=", "|=", "^=",
];

/// String prefixes of the subject language, lowercase.
static STRING_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["r", "b", "u", "f", "rb", "br", "rf", "fr"]
        .into_iter()
        .collect()
});

fn is_string_prefix(name: &str) -> bool {
    name.len() <= 2 && STRING_PREFIXES.contains(name.to_ascii_lowercase().as_str())
}

/// Would `a` directly followed by `b` retokenize with a different boundary?
///
/// Fusion happens when some operator longer than `a` is a prefix of the
/// concatenation (the scanner's maximal munch would eat past the boundary), or
/// when the concatenation itself begins a longer operator that a third adjacent
/// token could complete (the `. . .` case).
fn op_pair_fuses(a: &str, b: &str) -> bool {
    let concat = format!("{}{}", a, b);
    MULTI_CHAR_OPS.iter().any(|op| {
        (op.len() > a.len() && concat.starts_with(op))
            || (op.len() > concat.len() && op.starts_with(concat.as_str()))
    })
}

/// First quote character of a string literal, skipping any prefix letters.
fn opening_quote(text: &str) -> Option<char> {
    text.trim_start_matches(|c| "rRbBuUfF".contains(c)).chars().next()
}

/// Decide whether a separator is mandatory between two tokens that will be
/// adjacent in the output. Pure; evaluated left-to-right only.
pub fn needs_space(prev: &Token, next: &Token) -> bool {
    use TokenKind::*;
    match (prev.kind, next.kind) {
        (Name | Number, Name | Number) => true,
        (Name, Str) => {
            is_string_prefix(&prev.text)
                || next.text.starts_with(|c: char| c.is_ascii_alphabetic())
        }
        (Number, Str) => next.text.starts_with(|c: char| c.is_ascii_alphabetic()),
        (Op, Op) => op_pair_fuses(&prev.text, &next.text),
        (Op, Number) => {
            prev.text == "." && next.text.starts_with(|c: char| c.is_ascii_digit())
        }
        (Number, Op) => next.text.starts_with('.'),
        (Str, Str) => {
            prev.text.chars().last().is_some() && prev.text.chars().last() == opening_quote(&next.text)
        }
        _ => false,
    }
}
