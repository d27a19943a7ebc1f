//! ATX (`# Title`) and setext (underlined) headings.

use crate::token::{Token, TokenKind};

use super::BlockState;

pub(crate) fn atx_heading(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    silent: bool,
) -> bool {
    let shift = state.t_shift[start_line];
    if shift < 0 {
        return false;
    }

    let mut pos = state.b_marks[start_line] + shift as usize;
    let mut max = state.e_marks[start_line];
    if pos >= max || state.byte(pos) != b'#' {
        return false;
    }
    pos += 1;

    let mut h_level: u8 = 1;
    while pos < max && state.byte(pos) == b'#' && h_level <= 6 {
        h_level += 1;
        pos += 1;
    }
    if h_level > 6 || (pos < max && state.byte(pos) != b' ') {
        return false;
    }
    if silent {
        return true;
    }

    // Drop trailing spaces, then a closing `#` run if it follows a space.
    max = state.skip_bytes_back(max, b' ', pos);
    let closing = state.skip_bytes_back(max, b'#', pos);
    if closing > pos && state.byte(closing - 1) == b' ' {
        max = closing;
    }

    state.line = start_line + 1;
    let map = [start_line, state.line];
    state.push_open(Token::with_map(TokenKind::HeadingOpen { h_level }, map[0], map[1]));
    if pos < max {
        let content = state.src[pos..max].trim().to_string();
        state.push_inline(content, Some(map));
    }
    state.push_close(Token::new(TokenKind::HeadingClose { h_level }));
    true
}

/// A single text line followed by a line of `=` (level 1) or `-` (level 2).
pub(crate) fn setext_heading(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    _silent: bool,
) -> bool {
    let next_line = start_line + 1;
    if next_line >= end_line {
        return false;
    }

    let shift = state.t_shift[next_line];
    if shift < state.blk_indent || shift - state.blk_indent > 3 {
        return false;
    }

    let mut pos = state.b_marks[next_line] + shift as usize;
    let max = state.e_marks[next_line];
    if pos >= max {
        return false;
    }

    let marker = state.byte(pos);
    if marker != b'=' && marker != b'-' {
        return false;
    }
    pos = state.skip_bytes(pos, marker);
    pos = state.skip_spaces(pos);
    if pos < max {
        return false;
    }

    let start = state.content_start(start_line);
    let content = state
        .src
        .get(start..state.e_marks[start_line])
        .unwrap_or_default()
        .trim()
        .to_string();

    state.line = next_line + 1;
    let h_level = if marker == b'=' { 1 } else { 2 };
    state.push_open(Token::with_map(
        TokenKind::HeadingOpen { h_level },
        start_line,
        state.line,
    ));
    state.push_inline(content, Some([start_line, state.line - 1]));
    state.push_close(Token::new(TokenKind::HeadingClose { h_level }));
    true
}
