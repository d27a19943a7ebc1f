//! Block quotes.
//!
//! Each `>`-prefixed line is re-based in place so that the nested parser
//! sees the text after the marker. Lazy continuation lines get an indent of
//! `-1`. Everything is restored once the quote's content has been parsed.

use crate::token::{Token, TokenKind};

use super::{BlockRule, BlockState, ParentType, tokenize};
use super::{code_blocks, headings, horizontal_rules, html_blocks, lists};

/// Constructs that end a block quote's lazy continuation.
const TERMINATORS: &[BlockRule] = &[
    code_blocks::fence,
    horizontal_rules::hr,
    lists::list,
    headings::atx_heading,
    html_blocks::html_block,
];

pub(crate) fn blockquote(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    silent: bool,
) -> bool {
    let shift = state.t_shift[start_line];
    if shift < 0 {
        return false;
    }

    let mut pos = state.b_marks[start_line] + shift as usize;
    if state.byte(pos) != b'>' {
        return false;
    }
    if silent {
        return true;
    }

    pos += 1;
    let mut max = state.e_marks[start_line];
    if pos < max && state.byte(pos) == b' ' {
        pos += 1;
    }

    let old_indent = state.blk_indent;
    state.blk_indent = 0;

    let mut old_b_marks = vec![state.b_marks[start_line]];
    state.b_marks[start_line] = pos;
    if pos < max {
        pos = state.skip_spaces(pos);
    }
    let mut last_line_empty = pos >= max;

    let mut old_t_shift = vec![state.t_shift[start_line]];
    state.t_shift[start_line] = (pos - state.b_marks[start_line]) as isize;

    let mut next_line = start_line + 1;
    while next_line < end_line {
        let shift = state.t_shift[next_line];
        if shift < old_indent {
            break;
        }

        pos = (state.b_marks[next_line] as isize + shift).max(0) as usize;
        max = state.e_marks[next_line];
        if pos >= max {
            break;
        }

        if state.byte(pos) == b'>' {
            pos += 1;
            if pos < max && state.byte(pos) == b' ' {
                pos += 1;
            }

            old_b_marks.push(state.b_marks[next_line]);
            state.b_marks[next_line] = pos;
            if pos < max {
                pos = state.skip_spaces(pos);
            }
            last_line_empty = pos >= max;

            old_t_shift.push(state.t_shift[next_line]);
            state.t_shift[next_line] = (pos - state.b_marks[next_line]) as isize;
            next_line += 1;
            continue;
        }

        if last_line_empty {
            break;
        }

        // Both the previous and the current line are probed.
        let terminated = TERMINATORS.iter().any(|rule| {
            rule(state, next_line - 1, end_line, true) || rule(state, next_line, end_line, true)
        });
        if terminated {
            break;
        }

        old_b_marks.push(state.b_marks[next_line]);
        old_t_shift.push(state.t_shift[next_line]);
        state.t_shift[next_line] = -1;
        next_line += 1;
    }

    let old_parent = state.parent;
    state.parent = ParentType::BlockQuote;
    let open_idx = state.push_open(Token::with_map(TokenKind::BlockquoteOpen, start_line, 0));

    tokenize(state, start_line, next_line);

    state.push_close(Token::new(TokenKind::BlockquoteClose));
    state.parent = old_parent;
    let line = state.line;
    state.set_map_end(open_idx, line);

    for (i, (b_mark, t_shift)) in old_b_marks.into_iter().zip(old_t_shift).enumerate() {
        state.b_marks[start_line + i] = b_mark;
        state.t_shift[start_line + i] = t_shift;
    }
    state.blk_indent = old_indent;

    true
}
