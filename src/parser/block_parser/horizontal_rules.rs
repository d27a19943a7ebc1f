//! Thematic breaks: three or more `*`, `-` or `_`, optionally spaced.

use crate::token::{Token, TokenKind};

use super::BlockState;

pub(crate) fn hr(state: &mut BlockState<'_>, start_line: usize, _end_line: usize, silent: bool) -> bool {
    let shift = state.t_shift[start_line];
    if shift < 0 {
        return false;
    }

    let mut pos = state.b_marks[start_line] + shift as usize;
    let max = state.e_marks[start_line];
    let marker = state.byte(pos);
    if !matches!(marker, b'*' | b'-' | b'_') {
        return false;
    }
    pos += 1;

    let mut count = 1;
    while pos < max {
        let b = state.byte(pos);
        pos += 1;
        if b == marker {
            count += 1;
        } else if b != b' ' {
            return false;
        }
    }
    if count < 3 {
        return false;
    }
    if silent {
        return true;
    }

    state.line = start_line + 1;
    state.push(Token::with_map(TokenKind::Hr, start_line, state.line));
    true
}
