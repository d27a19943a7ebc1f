//! Backslash escapes and character references.

use crate::token::TokenKind;
use crate::utils::parse_entity;

use super::InlineState;

fn is_escapable(b: u8) -> bool {
    b.is_ascii_punctuation()
}

pub(crate) fn escape(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte(state.pos) != b'\\' {
        return false;
    }

    let mut pos = state.pos + 1;
    let max = state.pos_max;
    if pos < max {
        let b = state.byte(pos);
        if is_escapable(b) {
            if !silent {
                state.pending.push(b as char);
            }
            state.pos += 2;
            return true;
        }

        if b == b'\n' {
            if !silent {
                state.push(TokenKind::Hardbreak);
            }
            pos += 1;
            while pos < max && state.byte(pos) == b' ' {
                pos += 1;
            }
            state.pos = pos;
            return true;
        }
    }

    if !silent {
        state.pending.push('\\');
    }
    state.pos += 1;
    true
}

pub(crate) fn entity(state: &mut InlineState<'_>, silent: bool) -> bool {
    let pos = state.pos;
    if state.byte(pos) != b'&' {
        return false;
    }

    if pos + 1 < state.pos_max
        && let Some((decoded, len)) = parse_entity(&state.src[pos..state.pos_max])
    {
        if !silent {
            state.pending.push_str(&decoded);
        }
        state.pos += len;
        return true;
    }

    if !silent {
        state.pending.push('&');
    }
    state.pos += 1;
    true
}
