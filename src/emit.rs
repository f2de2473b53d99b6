//! Output assembly.
//!
//! Serializes the surviving groups into the minimized text: re-emits indentation
//! as `indent_char` repeated per depth level, suppresses line breaks inside open
//! brackets, collapses blank-line runs, drops or keeps comments and docstrings per
//! the options, and applies the spacing table between adjacent kept tokens.

use crate::events::{Event, EventSink};
use crate::grouping::TokenGroup;
use crate::options::Options;
use crate::spacing::needs_space;
use crate::token::{Token, TokenKind};

/// Untokenize groups into the final text, reporting removal statistics to the
/// sink when one is given.
pub fn untokenize(
    groups: &[TokenGroup],
    docstrings: &[bool],
    options: &Options,
    sink: Option<&dyn EventSink>,
) -> String {
    let mut out = String::new();
    let mut stats = Stats::default();
    let mut blank_pending = false;

    for (i, group) in groups.iter().enumerate() {
        if group.is_terminal() {
            break;
        }
        if group.is_blank() {
            if options.keep_blank_lines && !blank_pending {
                blank_pending = true;
            } else {
                stats.blank_lines += 1;
            }
            continue;
        }
        if group.is_comment_only() {
            if options.keep_comments || group.is_shebang() {
                flush_blank(&mut out, &mut blank_pending);
                emit_comment_line(&mut out, group, comment_depth(groups, i), options);
            } else {
                stats.comment_lines += 1;
            }
            continue;
        }
        if docstrings.get(i).copied().unwrap_or(false) && !options.keep_docstrings {
            stats.docstrings += 1;
            continue;
        }
        flush_blank(&mut out, &mut blank_pending);
        emit_group(&mut out, group, options, &mut stats);
    }

    if let Some(sink) = sink {
        sink.emit(Event::BlankLinesRemoved(stats.blank_lines));
        sink.emit(Event::CommentsRemoved {
            lines: stats.comment_lines,
            inline: stats.inline_comments,
        });
        sink.emit(Event::DocstringsRemoved(stats.docstrings));
    }
    out
}

#[derive(Default)]
struct Stats {
    blank_lines: usize,
    comment_lines: usize,
    inline_comments: usize,
    docstrings: usize,
}

/// Collapse a pending blank run into a single blank line. Called only when the
/// current group is actually emitted, so a run interrupted by removed groups
/// still produces at most one blank line.
fn flush_blank(out: &mut String, blank_pending: &mut bool) {
    if *blank_pending {
        out.push('\n');
        *blank_pending = false;
    }
}

/// Depth to indent a kept comment line at. Dedent tokens attach to the next code
/// group, so a comment trailing a block body closes at the stale pre-dedent
/// depth; clamp it to the depth of the next group that holds code.
fn comment_depth(groups: &[TokenGroup], index: usize) -> usize {
    let own = groups[index].indent_depth;
    groups[index + 1..]
        .iter()
        .find(|g| g.content_tokens().next().is_some())
        .map_or(0, |g| g.indent_depth.min(own))
}

fn emit_comment_line(out: &mut String, group: &TokenGroup, depth: usize, options: &Options) {
    for _ in 0..depth {
        out.push_str(&options.indent_char);
    }
    for token in &group.tokens {
        if token.kind == TokenKind::Comment {
            out.push_str(token.text.trim_end());
        }
    }
    out.push('\n');
}

/// Emit one code group: indentation, content tokens with separators, a newline at
/// the logical line end. Nl tokens inside the group are interior line breaks of a
/// bracketed continuation and are suppressed, except directly after a kept inline
/// comment, where the break must survive so the rest of the logical line is not
/// commented out.
fn emit_group(out: &mut String, group: &TokenGroup, options: &Options, stats: &mut Stats) {
    for _ in 0..group.indent_depth {
        out.push_str(&options.indent_char);
    }
    let mut prev: Option<&Token> = None;
    let mut after_comment = false;

    for token in &group.tokens {
        match token.kind {
            TokenKind::Indent | TokenKind::Dedent | TokenKind::EndMarker => {}
            TokenKind::Nl => {
                if after_comment {
                    out.push('\n');
                    after_comment = false;
                    prev = None;
                }
            }
            TokenKind::Newline => {
                out.push('\n');
            }
            TokenKind::Comment => {
                if options.keep_comments {
                    if prev.is_some() {
                        out.push_str(&options.whitespace_char);
                    }
                    out.push_str(token.text.trim_end());
                    after_comment = true;
                } else {
                    stats.inline_comments += 1;
                }
            }
            TokenKind::Name | TokenKind::Number | TokenKind::Str | TokenKind::Op => {
                if let Some(p) = prev {
                    push_separator(out, p, token, options);
                }
                out.push_str(&token.text);
                prev = Some(token);
                after_comment = false;
            }
        }
    }
}

/// Separator between two adjacent kept content tokens. With `keep_whitespace` the
/// original same-line gap is reproduced; across a suppressed line break, and in
/// re-spacing mode, the spacing table decides.
fn push_separator(out: &mut String, prev: &Token, next: &Token, options: &Options) {
    if options.keep_whitespace && next.start.line == prev.end.line {
        let gap = next.start.column.saturating_sub(prev.end.column);
        for _ in 0..gap {
            out.push_str(&options.whitespace_char);
        }
    } else if needs_space(prev, next) {
        out.push_str(&options.whitespace_char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstring::docstring_flags;
    use crate::grouping::group_tokens;
    use crate::lexing;

    fn run(source: &str, options: &Options) -> String {
        let source = lexing::ensure_source_ends_with_newline(source);
        let groups = group_tokens(lexing::lex(&source).expect("lexes")).expect("groups");
        let flags = docstring_flags(&groups);
        untokenize(&groups, &flags, options, None)
    }

    #[test]
    fn test_respacing_packs_tokens() {
        assert_eq!(run("x  =  1\n", &Options::default()), "x=1\n");
        assert_eq!(run("return  1 + 2\n", &Options::default()), "return 1+2\n");
    }

    #[test]
    fn test_indent_reemission() {
        assert_eq!(
            run("def f():\n        return 1\n", &Options::default()),
            "def f():\n\treturn 1\n"
        );
        let spaces = Options {
            indent_char: "  ".to_string(),
            ..Options::default()
        };
        assert_eq!(
            run("def f():\n\treturn 1\n", &spaces),
            "def f():\n  return 1\n"
        );
    }

    #[test]
    fn test_bracket_continuation_joined() {
        assert_eq!(run("f(1,\n   2)\n", &Options::default()), "f(1,2)\n");
    }

    #[test]
    fn test_blank_lines_dropped_by_default() {
        assert_eq!(run("a = 1\n\n\nb = 2\n", &Options::default()), "a=1\nb=2\n");
    }

    #[test]
    fn test_blank_lines_collapse_when_kept() {
        let opts = Options {
            keep_blank_lines: true,
            ..Options::default()
        };
        assert_eq!(run("a = 1\n\n\n\nb = 2\n", &opts), "a=1\n\nb=2\n");
    }

    #[test]
    fn test_trailing_blank_lines_do_not_dangle() {
        let opts = Options {
            keep_blank_lines: true,
            ..Options::default()
        };
        assert_eq!(run("a = 1\n\n\n", &opts), "a=1\n");
    }

    #[test]
    fn test_blank_run_across_removed_group_stays_collapsed() {
        let opts = Options {
            keep_blank_lines: true,
            ..Options::default()
        };
        // the removed comment line must not split the run into two blank lines
        assert_eq!(
            run("x = 1\n\n# c\n\ny = 2\n", &opts),
            "x=1\n\ny=2\n"
        );
    }

    #[test]
    fn test_shebang_survives_default_stripping() {
        assert_eq!(
            run("#!/usr/bin/env python\nx = 1\n", &Options::default()),
            "#!/usr/bin/env python\nx=1\n"
        );
    }

    #[test]
    fn test_shebang_like_comment_on_later_line_is_removed() {
        assert_eq!(run("x = 1\n#! nope\ny = 2\n", &Options::default()), "x=1\ny=2\n");
    }

    #[test]
    fn test_kept_comment_after_block_uses_next_depth() {
        let opts = Options {
            keep_comments: true,
            ..Options::default()
        };
        assert_eq!(
            run("def f():\n    return 1\n# note\nx = 2\n", &opts),
            "def f():\n\treturn 1\n# note\nx=2\n"
        );
    }

    #[test]
    fn test_inline_comment_dropped_with_its_spacing() {
        let opts = Options {
            keep_whitespace: true,
            ..Options::default()
        };
        assert_eq!(run("y = 2  # comment\n", &opts), "y = 2\n");
    }

    #[test]
    fn test_inline_comment_kept() {
        let opts = Options {
            keep_comments: true,
            ..Options::default()
        };
        assert_eq!(run("y = 2  # comment\n", &opts), "y=2 # comment\n");
    }

    #[test]
    fn test_comment_inside_brackets_keeps_line_break() {
        let opts = Options {
            keep_comments: true,
            ..Options::default()
        };
        assert_eq!(run("f(1, # one\n  2)\n", &opts), "f(1, # one\n2)\n");
    }

    #[test]
    fn test_whitespace_char_substitution() {
        let opts = Options {
            whitespace_char: "\u{a0}".to_string(),
            ..Options::default()
        };
        assert_eq!(run("return 1\n", &opts), "return\u{a0}1\n");
    }

    #[test]
    fn test_counts_reported() {
        use crate::events::CountingSink;
        let source = "'''doc'''\n\n# line\nx = 1  # inline\n\n";
        let source = lexing::ensure_source_ends_with_newline(source);
        let groups = group_tokens(lexing::lex(&source).expect("lexes")).expect("groups");
        let flags = docstring_flags(&groups);
        let sink = CountingSink::default();
        untokenize(&groups, &flags, &Options::default(), Some(&sink));
        assert_eq!(sink.blank_lines.get(), 2);
        assert_eq!(sink.comment_lines.get(), 1);
        assert_eq!(sink.inline_comments.get(), 1);
        assert_eq!(sink.docstrings.get(), 1);
    }
}
