//! Indented code blocks and fenced code blocks.

use crate::token::{Token, TokenKind};

use super::BlockState;

/// Four or more columns of indent beyond the container's content indent.
pub(crate) fn indented_code(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    _silent: bool,
) -> bool {
    if state.t_shift[start_line] - state.blk_indent < 4 {
        return false;
    }

    let mut next_line = start_line + 1;
    let mut last = next_line;
    while next_line < end_line {
        if state.is_line_empty(next_line) {
            next_line += 1;
            continue;
        }
        if state.t_shift[next_line] - state.blk_indent > 3 {
            next_line += 1;
            last = next_line;
            continue;
        }
        break;
    }

    state.line = next_line;
    let content = state.lines(start_line, last, 4 + state.blk_indent, true);
    state.push(Token::with_map(
        TokenKind::CodeBlock { content },
        start_line,
        next_line,
    ));
    true
}

/// Opening run of three or more backticks or tildes, optional info string
/// (no backticks in it). Runs until a closing run of the same marker that is
/// at least as long, or the end of the container.
pub(crate) fn fence(
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
    let max = state.e_marks[start_line];
    if pos + 3 > max {
        return false;
    }

    let marker = state.byte(pos);
    if marker != b'`' && marker != b'~' {
        return false;
    }

    let open_start = pos;
    pos = state.skip_bytes(pos, marker);
    let fence_len = pos - open_start;
    if fence_len < 3 {
        return false;
    }

    let params = state.src[pos..max].trim();
    if params.contains('`') {
        return false;
    }
    if silent {
        return true;
    }
    let params = params.to_string();

    let mut next_line = start_line;
    let mut have_end_marker = false;
    loop {
        next_line += 1;
        if next_line >= end_line {
            break;
        }

        let line_shift = state.t_shift[next_line];
        let start = state.b_marks[next_line] as isize + line_shift;
        let max = state.e_marks[next_line];
        if start >= max as isize {
            continue;
        }
        if line_shift < state.blk_indent {
            break;
        }

        let start = start as usize;
        if state.byte(start) != marker || line_shift - state.blk_indent > 3 {
            continue;
        }

        let end = state.skip_bytes(start, marker);
        if end - start < fence_len {
            continue;
        }
        if state.skip_spaces(end) < max {
            continue;
        }

        have_end_marker = true;
        break;
    }

    state.line = next_line + usize::from(have_end_marker);
    let content = state.lines(start_line + 1, next_line, shift, true);
    state.push(Token::with_map(
        TokenKind::Fence { params, content },
        start_line,
        next_line,
    ));
    true
}
