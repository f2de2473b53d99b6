//! Logical-line transformation.
//!
//! Converts the raw logos stream into the annotated token stream the engine
//! consumes: leading whitespace becomes semantic Indent/Dedent tokens, physical
//! line ends become Newline (statement end) or Nl (blank line, comment-only line,
//! or a line inside open brackets), and the stream is closed with trailing dedents
//! and a single EndMarker.
//!
//! The transformation is also where the tokenizer contract is enforced: bracket
//! depth must never go negative, every dedent must land on a width already on the
//! indent stack, and every bracket must be closed by end of input.

use crate::error::MinimizeError;
use crate::lexing::base_tokenization::RawToken;
use crate::token::{Position, Token, TokenKind};

/// Byte-offset to line/column translation for one source text.
pub(crate) struct LineMap<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineMap<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        LineMap { source, starts }
    }

    pub(crate) fn position(&self, offset: usize) -> Position {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let column = self.source[self.starts[line]..offset].chars().count();
        Position::new(line + 1, column)
    }
}

/// Width of a leading whitespace run, with tabs advancing to the next multiple
/// of 8 and form feeds resetting the column, as the subject language's own
/// tokenizer measures indentation.
fn indent_width(whitespace: &str) -> usize {
    let mut width = 0;
    for ch in whitespace.chars() {
        match ch {
            '\t' => width = (width / 8 + 1) * 8,
            '\x0c' => width = 0,
            _ => width += 1,
        }
    }
    width
}

/// Transform raw tokens into the annotated stream.
///
/// The input must come from [tokenize](crate::lexing::base_tokenization::tokenize)
/// over the same source text, which must end with a newline.
pub fn annotate(
    raw: &[(RawToken, logos::Span)],
    source: &str,
) -> Result<Vec<Token>, MinimizeError> {
    let map = LineMap::new(source);
    let mut out: Vec<Token> = Vec::new();
    let mut bracket_depth: usize = 0;
    let mut indent_stack: Vec<usize> = vec![0];
    let mut at_line_start = true;
    let mut line_has_code = false;
    let mut pending_indent: usize = 0;
    let mut logical_line: usize = 0;

    for (raw_token, span) in raw {
        match raw_token {
            RawToken::Whitespace => {
                if at_line_start && bracket_depth == 0 {
                    pending_indent = indent_width(&source[span.clone()]);
                }
            }
            RawToken::Continuation => {
                // joins physical lines; the next line's leading whitespace is not indentation
                at_line_start = false;
            }
            RawToken::Newline => {
                let kind = if bracket_depth == 0 && line_has_code {
                    TokenKind::Newline
                } else {
                    TokenKind::Nl
                };
                out.push(make_token(kind, source, span, &map, logical_line));
                if kind == TokenKind::Newline {
                    logical_line += 1;
                }
                at_line_start = true;
                line_has_code = false;
                pending_indent = 0;
            }
            RawToken::Comment => {
                // comment-only lines never touch the indent stack
                out.push(make_token(
                    TokenKind::Comment,
                    source,
                    span,
                    &map,
                    logical_line,
                ));
                at_line_start = false;
            }
            RawToken::Name | RawToken::Number | RawToken::Str | RawToken::Op => {
                if at_line_start && bracket_depth == 0 {
                    adjust_indentation(
                        &mut out,
                        &mut indent_stack,
                        pending_indent,
                        &map,
                        span.start,
                        logical_line,
                    )?;
                }
                at_line_start = false;
                line_has_code = true;
                if *raw_token == RawToken::Op {
                    match &source[span.clone()] {
                        "(" | "[" | "{" => bracket_depth += 1,
                        ")" | "]" | "}" => {
                            bracket_depth = bracket_depth.checked_sub(1).ok_or_else(|| {
                                let pos = map.position(span.start);
                                MinimizeError::MalformedTokenStream(format!(
                                    "bracket depth went negative at line {} column {}",
                                    pos.line, pos.column
                                ))
                            })?;
                        }
                        _ => {}
                    }
                }
                let kind = match raw_token {
                    RawToken::Name => TokenKind::Name,
                    RawToken::Number => TokenKind::Number,
                    RawToken::Str => TokenKind::Str,
                    _ => TokenKind::Op,
                };
                out.push(make_token(kind, source, span, &map, logical_line));
            }
        }
    }

    if bracket_depth > 0 {
        return Err(MinimizeError::MalformedTokenStream(
            "bracket left open at end of input".to_string(),
        ));
    }
    let eof = map.position(source.len());
    while indent_stack.len() > 1 {
        indent_stack.pop();
        out.push(synthetic(TokenKind::Dedent, eof, logical_line));
    }
    out.push(synthetic(TokenKind::EndMarker, eof, logical_line));
    Ok(out)
}

/// Compare the current line's indentation width against the stack and emit the
/// level changes. A dedent that lands between two stacked widths is a malformed
/// stream.
fn adjust_indentation(
    out: &mut Vec<Token>,
    indent_stack: &mut Vec<usize>,
    width: usize,
    map: &LineMap,
    offset: usize,
    logical_line: usize,
) -> Result<(), MinimizeError> {
    let position = map.position(offset);
    let top = indent_stack.last().copied().unwrap_or(0);
    if width > top {
        indent_stack.push(width);
        out.push(synthetic(TokenKind::Indent, position, logical_line));
    } else if width < top {
        while indent_stack.last().copied().unwrap_or(0) > width {
            indent_stack.pop();
            out.push(synthetic(TokenKind::Dedent, position, logical_line));
        }
        if indent_stack.last().copied().unwrap_or(0) != width {
            return Err(MinimizeError::MalformedTokenStream(format!(
                "inconsistent dedent at line {}",
                position.line
            )));
        }
    }
    Ok(())
}

fn make_token(
    kind: TokenKind,
    source: &str,
    span: &logos::Span,
    map: &LineMap,
    logical_line: usize,
) -> Token {
    Token {
        kind,
        text: source[span.clone()].to_string(),
        start: map.position(span.start),
        end: map.position(span.end),
        logical_line,
    }
}

fn synthetic(kind: TokenKind, position: Position, logical_line: usize) -> Token {
    Token {
        kind,
        text: String::new(),
        start: position,
        end: position,
        logical_line,
    }
}
