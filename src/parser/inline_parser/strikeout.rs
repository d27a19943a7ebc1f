//! Strikethrough: `~~text~~`.

use crate::token::TokenKind;

use super::emphasis::scan_delims;
use super::{InlineState, skip_token, tokenize};

pub(crate) fn strikethrough(state: &mut InlineState<'_>, silent: bool) -> bool {
    let start = state.pos;
    if state.byte(start) != b'~' {
        return false;
    }
    if silent {
        return false;
    }

    let max = state.pos_max;
    let opener = scan_delims(state, start);
    if !opener.can_open {
        state.pos += opener.count;
        let src = state.src;
        state.pending.push_str(&src[start..state.pos]);
        return true;
    }

    // Open pairs of tildes.
    let mut stack = opener.count / 2;
    if stack == 0 {
        return false;
    }
    if state.closer_absent(b'~', start) {
        return false;
    }
    state.pos = start + opener.count;

    let mut found = false;
    let mut last_closer = start;
    while state.pos < max {
        if state.byte(state.pos) != b'~' {
            skip_token(state);
            continue;
        }

        let run = scan_delims(state, state.pos);
        let pairs = run.count / 2;
        if run.can_close && pairs > 0 {
            last_closer = state.pos + run.count;
            if pairs >= stack {
                state.pos += run.count - 2;
                found = true;
                break;
            }
            stack -= pairs;
            state.pos += run.count;
            continue;
        }

        if run.can_open {
            stack += pairs;
        }
        state.pos += run.count;
    }

    if !found {
        state.mark_closer_absent(b'~', last_closer);
        state.pos = start;
        return false;
    }

    state.pos_max = state.pos;
    state.pos = start + 2;

    state.push_open(TokenKind::StrikethroughOpen);
    tokenize(state);
    state.push_close(TokenKind::StrikethroughClose);

    state.pos = state.pos_max + 2;
    state.pos_max = max;
    true
}
