//! Positional docstring detection.
//!
//! A lone string statement is a docstring only by position: the first statement of
//! the module, or the first statement after a block header ending in a colon. The
//! string's contents and quote style are irrelevant, and a string used as a value
//! (assigned, passed, returned) is never a docstring.
//!
//! Detection is a single forward pass over the groups with an explicit expectation
//! stack indexed by indentation depth, so nested functions and classes each get
//! their own documentation position. Blank and comment-only groups do not consume
//! the expectation.

use crate::grouping::TokenGroup;

/// Compute, for each group, whether it is a docstring to be dropped when
/// docstring removal is active. Runs in one pass; `flags[i]` corresponds to
/// `groups[i]`.
pub fn docstring_flags(groups: &[TokenGroup]) -> Vec<bool> {
    let mut flags = vec![false; groups.len()];
    // expectation per indentation depth; true means the next statement seen at
    // that depth is in documentation position
    let mut expect: Vec<bool> = vec![true];
    // depth of the most recent block header, for the same-level case
    let mut armed: Option<usize> = None;

    for (i, group) in groups.iter().enumerate() {
        if group.is_terminal() {
            break;
        }
        if group.is_blank() || group.is_comment_only() {
            continue;
        }
        let depth = group.indent_depth;
        if expect.len() <= depth {
            expect.resize(depth + 1, false);
        }
        let documented = expect[depth] || armed == Some(depth);
        if documented && group.is_docstring_candidate() {
            flags[i] = true;
        }
        expect[depth] = false;
        if group.opens_block() {
            armed = Some(depth);
            if expect.len() <= depth + 1 {
                expect.resize(depth + 2, false);
            }
            expect[depth + 1] = true;
        } else {
            armed = None;
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_tokens;
    use crate::lexing;

    fn flags(source: &str) -> Vec<bool> {
        let source = lexing::ensure_source_ends_with_newline(source);
        let groups = group_tokens(lexing::lex(&source).expect("lexes")).expect("groups");
        docstring_flags(&groups)
    }

    #[test]
    fn test_module_docstring() {
        assert_eq!(flags("'''module doc'''\nx = 1\n"), vec![true, false, false]);
    }

    #[test]
    fn test_module_docstring_after_comment() {
        // comment lines do not consume the documentation position
        assert_eq!(
            flags("# header\n'''module doc'''\n"),
            vec![false, true, false]
        );
    }

    #[test]
    fn test_function_docstring() {
        assert_eq!(
            flags("def f():\n    '''doc'''\n    return 1\n"),
            vec![false, true, false, false]
        );
    }

    #[test]
    fn test_second_statement_string_is_not_docstring() {
        assert_eq!(
            flags("def f():\n    x = 1\n    'not a docstring'\n"),
            vec![false, false, false, false]
        );
    }

    #[test]
    fn test_string_value_is_not_docstring() {
        assert_eq!(flags("x = 'value'\n"), vec![false, false]);
    }

    #[test]
    fn test_nested_docstrings() {
        let src = "\
class A:
    '''class doc'''
    def m(self):
        '''method doc'''
        pass
";
        assert_eq!(flags(src), vec![false, true, false, true, false, false]);
    }

    #[test]
    fn test_sibling_functions_each_get_position() {
        let src = "\
def f():
    '''f doc'''
def g():
    '''g doc'''
";
        assert_eq!(flags(src), vec![false, true, false, true, false]);
    }

    #[test]
    fn test_blank_lines_between_header_and_docstring() {
        let src = "def f():\n\n    '''doc'''\n";
        assert_eq!(flags(src), vec![false, false, true, false]);
    }

    #[test]
    fn test_plain_block_header_arms_position() {
        // per the detection rule, any colon-terminated header opens a
        // documentation position, not only def/class
        assert_eq!(
            flags("if x:\n    'note'\n"),
            vec![false, true, false]
        );
    }

    #[test]
    fn test_multiline_string_docstring() {
        assert_eq!(
            flags("def f():\n    '''doc\n    spanning lines'''\n    pass\n"),
            vec![false, true, false, false]
        );
    }
}
