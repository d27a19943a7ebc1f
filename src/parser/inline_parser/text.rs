//! Plain text runs and line breaks.

use crate::token::TokenKind;

use super::InlineState;

/// Bytes that may start some other inline construct.
fn is_terminator(b: u8) -> bool {
    matches!(
        b,
        b'\n'
            | b'!'
            | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'*'
            | b'+'
            | b'-'
            | b':'
            | b'<'
            | b'='
            | b'>'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
            | b'_'
            | b'`'
            | b'{'
            | b'}'
            | b'~'
    )
}

pub(crate) fn text(state: &mut InlineState<'_>, silent: bool) -> bool {
    let src = state.src;
    let bytes = src.as_bytes();
    let mut pos = state.pos;
    while pos < state.pos_max && !is_terminator(bytes[pos]) {
        pos += 1;
    }
    if pos == state.pos {
        return false;
    }

    if !silent {
        state.pending.push_str(&src[state.pos..pos]);
    }
    state.pos = pos;
    true
}

/// Two or more spaces before a newline make a hard break, otherwise the
/// newline is a soft break. Spaces around the newline are dropped.
pub(crate) fn newline(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte(state.pos) != b'\n' {
        return false;
    }

    if !silent {
        let trimmed = state.pending.trim_end_matches(' ').len();
        let trailing = state.pending.len() - trimmed;
        if trailing >= 2 {
            state.pending.truncate(trimmed);
            state.push(TokenKind::Hardbreak);
        } else {
            state.pending.truncate(trimmed);
            state.push(TokenKind::Softbreak);
        }
    }

    let mut pos = state.pos + 1;
    while pos < state.pos_max && state.byte(pos) == b' ' {
        pos += 1;
    }
    state.pos = pos;
    true
}
