//! Code spans: a backtick run closed by a run of equal length.

use crate::token::TokenKind;
use crate::utils::normalize_inline_code;

use super::InlineState;

pub(crate) fn backticks(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte(state.pos) != b'`' {
        return false;
    }

    let src = state.src;
    let bytes = src.as_bytes();
    let max = state.pos_max;
    let start = state.pos;
    let mut pos = start + 1;
    while pos < max && bytes[pos] == b'`' {
        pos += 1;
    }
    let marker_len = pos - start;

    let mut end = pos;
    loop {
        let mut run_start = end;
        while run_start < max && bytes[run_start] != b'`' {
            run_start += 1;
        }
        if run_start >= max {
            break;
        }
        end = run_start + 1;
        while end < max && bytes[end] == b'`' {
            end += 1;
        }

        if end - run_start == marker_len {
            if !silent {
                let content = normalize_inline_code(&src[pos..run_start]);
                state.push(TokenKind::CodeInline { content });
            }
            state.pos = end;
            return true;
        }
    }

    if !silent {
        state.pending.push_str(&src[start..pos]);
    }
    state.pos = pos;
    true
}
