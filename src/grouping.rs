//! Token groups.
//!
//! A token group is a run of tokens between structural boundaries, lexically
//! adjacent on one logical line (or one blank/comment-only physical line). Groups
//! are the unit at which blank lines, comment lines, and docstrings are classified
//! and dropped.
//!
//! A group stays open across Nl tokens while brackets are open, so a bracketed
//! multi-line call is a single group and its interior line breaks can be
//! suppressed at emission time.

use crate::error::MinimizeError;
use crate::token::{Token, TokenKind};

/// An ordered run of tokens closed by a structural boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGroup {
    pub tokens: Vec<Token>,
    /// Indentation depth in force when the group closed. Indent/Dedent tokens are
    /// attached to the group they precede, so the depth can be read off the group.
    pub indent_depth: usize,
}

impl TokenGroup {
    /// Content tokens only: names, numbers, strings, operators.
    pub fn content_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_content())
    }

    /// A blank line: nothing but Nl markers.
    pub fn is_blank(&self) -> bool {
        !self.tokens.is_empty() && self.tokens.iter().all(|t| t.kind == TokenKind::Nl)
    }

    /// A comment with no code on its line.
    pub fn is_comment_only(&self) -> bool {
        self.content_tokens().next().is_none()
            && self.tokens.iter().any(|t| t.kind == TokenKind::Comment)
    }

    /// The shebang line: a comment on the first physical line starting with
    /// `#!`. Survives comment removal so the file stays executable.
    pub fn is_shebang(&self) -> bool {
        self.is_comment_only()
            && self.tokens.iter().any(|t| {
                t.kind == TokenKind::Comment && t.start.line == 1 && t.text.starts_with("#!")
            })
    }

    /// Exactly one content token, and it is a string literal. Whether the group is
    /// actually a docstring depends on its position; see [crate::docstring].
    pub fn is_docstring_candidate(&self) -> bool {
        let mut content = self.content_tokens();
        matches!(content.next(), Some(t) if t.kind == TokenKind::Str) && content.next().is_none()
    }

    /// A block header: the group's last content token is a colon.
    pub fn opens_block(&self) -> bool {
        self.content_tokens()
            .last()
            .map_or(false, |t| t.kind == TokenKind::Op && t.text == ":")
    }

    /// The group holding the end marker; nothing after it is emitted.
    pub fn is_terminal(&self) -> bool {
        self.tokens.iter().any(|t| t.kind == TokenKind::EndMarker)
    }
}

/// Partition a token stream into groups.
///
/// A group closes at every Newline, at every Nl at bracket depth zero, and at the
/// end marker. The engine re-validates the stream invariants here rather than
/// trusting the tokenizer: bracket depth and indentation depth must never go
/// negative, and the stream must contain an end marker. Tokens after the end
/// marker are a protocol violation and are ignored.
pub fn group_tokens(tokens: Vec<Token>) -> Result<Vec<TokenGroup>, MinimizeError> {
    let mut groups = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut depth: usize = 0;
    let mut bracket_depth: usize = 0;
    let mut saw_end = false;

    for token in tokens {
        if saw_end {
            break;
        }
        match token.kind {
            TokenKind::Indent => {
                depth += 1;
                current.push(token);
            }
            TokenKind::Dedent => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    MinimizeError::MalformedTokenStream(
                        "dedent below indentation depth zero".to_string(),
                    )
                })?;
                current.push(token);
            }
            TokenKind::Op => {
                match token.text.as_str() {
                    "(" | "[" | "{" => bracket_depth += 1,
                    ")" | "]" | "}" => {
                        bracket_depth = bracket_depth.checked_sub(1).ok_or_else(|| {
                            MinimizeError::MalformedTokenStream(
                                "bracket depth went negative".to_string(),
                            )
                        })?;
                    }
                    _ => {}
                }
                current.push(token);
            }
            TokenKind::Newline => {
                current.push(token);
                groups.push(close(&mut current, depth));
            }
            TokenKind::Nl => {
                current.push(token);
                if bracket_depth == 0 {
                    groups.push(close(&mut current, depth));
                }
            }
            TokenKind::EndMarker => {
                saw_end = true;
                current.push(token);
                groups.push(close(&mut current, depth));
            }
            TokenKind::Name | TokenKind::Number | TokenKind::Str | TokenKind::Comment => {
                current.push(token);
            }
        }
    }

    if !saw_end {
        return Err(MinimizeError::MalformedTokenStream(
            "token stream has no end marker".to_string(),
        ));
    }
    Ok(groups)
}

fn close(current: &mut Vec<Token>, depth: usize) -> TokenGroup {
    TokenGroup {
        tokens: std::mem::take(current),
        indent_depth: depth,
    }
}
