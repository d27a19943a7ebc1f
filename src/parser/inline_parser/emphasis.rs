//! Emphasis and strong emphasis with `*` and `_`.
//!
//! The rule scans forward from an opening run with a stack of unmatched run
//! lengths. Closing runs reduce the stack; when it empties, the span between
//! the opener and the closer is tokenized recursively.

use crate::token::TokenKind;
use crate::utils::{char_at, char_before, is_punct};

use super::{InlineState, skip_token, tokenize};

/// Whether a delimiter run may open or close, and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delimiters {
    pub can_open: bool,
    pub can_close: bool,
    pub count: usize,
}

/// Classify the delimiter run starting at `start` by its flanking
/// characters. `_` may not open or close inside a word.
pub(crate) fn scan_delims(state: &InlineState<'_>, start: usize) -> Delimiters {
    let marker = state.byte(start);
    let mut pos = start;
    while pos < state.pos_max && state.byte(pos) == marker {
        pos += 1;
    }
    let count = pos - start;

    let last = char_before(state.src, start);
    let next = char_at(state.src, pos);

    let last_space_or_start = last.is_none_or(char::is_whitespace);
    let next_space_or_end = next.is_none_or(char::is_whitespace);
    let last_punct = !last_space_or_start && last.is_some_and(is_punct);
    let next_punct = !next_space_or_end && next.is_some_and(is_punct);

    let left_flanking = !next_space_or_end && (!next_punct || last_space_or_start || last_punct);
    let right_flanking = !last_space_or_start && (!last_punct || next_space_or_end || next_punct);

    let (can_open, can_close) = if marker == b'_' {
        (
            left_flanking && (!right_flanking || last_punct),
            right_flanking && (!left_flanking || next_punct),
        )
    } else {
        (left_flanking, right_flanking)
    };

    Delimiters {
        can_open,
        can_close,
        count,
    }
}

pub(crate) fn emphasis(state: &mut InlineState<'_>, silent: bool) -> bool {
    let start = state.pos;
    let marker = state.byte(start);
    if marker != b'*' && marker != b'_' {
        return false;
    }
    if silent {
        return false;
    }

    let max = state.pos_max;
    let opener = scan_delims(state, start);
    let mut start_count = opener.count;
    state.pos += start_count;
    if !opener.can_open {
        let src = state.src;
        state.pending.push_str(&src[start..state.pos]);
        return true;
    }

    if state.closer_absent(marker, start) {
        state.pos = start;
        return false;
    }

    let mut stack = vec![start_count];
    let mut found = false;
    // End of the last run able to close; no closer starts after it.
    let mut last_closer = start;
    while state.pos < max {
        if state.byte(state.pos) != marker {
            skip_token(state);
            continue;
        }

        let run = scan_delims(state, state.pos);
        if run.can_close {
            last_closer = state.pos + run.count;
            let mut old_count = stack.pop().unwrap_or(0);
            let mut new_count = run.count;

            while old_count != new_count {
                if new_count < old_count {
                    stack.push(old_count - new_count);
                    break;
                }
                new_count -= old_count;
                let Some(next) = stack.pop() else {
                    break;
                };
                state.pos += old_count;
                old_count = next;
            }

            if stack.is_empty() {
                start_count = old_count;
                found = true;
                break;
            }
            state.pos += run.count;
            continue;
        }

        if run.can_open {
            stack.push(run.count);
        }
        state.pos += run.count;
    }

    if !found {
        state.mark_closer_absent(marker, last_closer);
        state.pos = start;
        return false;
    }

    // The closing run starts at the cursor.
    state.pos_max = state.pos;
    state.pos = start + start_count;

    let mut count = start_count;
    while count > 1 {
        state.push_open(TokenKind::StrongOpen);
        count -= 2;
    }
    if count > 0 {
        state.push_open(TokenKind::EmphasisOpen);
    }

    tokenize(state);

    if count % 2 != 0 {
        state.push_close(TokenKind::EmphasisClose);
    }
    count = start_count;
    while count > 1 {
        state.push_close(TokenKind::StrongClose);
        count -= 2;
    }

    state.pos = state.pos_max + start_count;
    state.pos_max = max;
    true
}
