//! Bullet and ordered lists.

use crate::token::{Token, TokenKind};

use super::{BlockRule, BlockState, ParentType, any_rule_matches, tokenize};
use super::{blockquotes, code_blocks, horizontal_rules};

/// Constructs that end a list between items.
const TERMINATORS: &[BlockRule] = &[
    code_blocks::fence,
    blockquotes::blockquote,
    horizontal_rules::hr,
];

/// Position after a `*`, `+` or `-` marker, which must be followed by a
/// space or the end of the line.
fn skip_bullet_marker(state: &BlockState<'_>, line: usize) -> Option<usize> {
    let mut pos = state.content_start(line);
    if !matches!(state.byte(pos), b'*' | b'+' | b'-') {
        return None;
    }
    pos += 1;
    if pos < state.e_marks[line] && state.byte(pos) != b' ' {
        return None;
    }
    Some(pos)
}

/// Position after a `1.` or `1)` marker, which must be followed by a space
/// or the end of the line.
fn skip_ordered_marker(state: &BlockState<'_>, line: usize) -> Option<usize> {
    let mut pos = state.content_start(line);
    let max = state.e_marks[line];
    if pos + 1 >= max || !state.byte(pos).is_ascii_digit() {
        return None;
    }

    loop {
        if pos >= max {
            return None;
        }
        let b = state.byte(pos);
        pos += 1;
        if b.is_ascii_digit() {
            continue;
        }
        if b == b')' || b == b'.' {
            break;
        }
        return None;
    }

    if pos < max && state.byte(pos) != b' ' {
        return None;
    }
    Some(pos)
}

/// Flag the paragraphs directly inside the list's items as tight.
fn mark_paragraphs_tight(state: &mut BlockState<'_>, idx: usize) {
    let level = state.level + 2;
    let len = state.tokens.len();
    let mut i = idx + 2;
    while i + 2 < len {
        if state.tokens[i].level == level
            && let TokenKind::ParagraphOpen { tight } = &mut state.tokens[i].kind
        {
            *tight = true;
            i += 2;
            if let TokenKind::ParagraphClose { tight } = &mut state.tokens[i].kind {
                *tight = true;
            }
        }
        i += 1;
    }
}

pub(crate) fn list(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    silent: bool,
) -> bool {
    let shift = state.t_shift[start_line];
    if shift < 0 {
        return false;
    }

    let (is_ordered, mut pos_after_marker) = match skip_ordered_marker(state, start_line) {
        Some(pos) => (true, pos),
        None => match skip_bullet_marker(state, start_line) {
            Some(pos) => (false, pos),
            None => return false,
        },
    };
    let marker_char = state.byte(pos_after_marker - 1);
    if silent {
        return true;
    }

    let token_idx = state.tokens.len();
    if is_ordered {
        let start = state.b_marks[start_line] + shift as usize;
        let digits = &state.src[start..pos_after_marker - 1];
        let order = digits.parse::<u64>().unwrap_or(u64::MAX);
        state.push_open(Token::with_map(
            TokenKind::OrderedListOpen { order },
            start_line,
            0,
        ));
    } else {
        state.push_open(Token::with_map(TokenKind::BulletListOpen, start_line, 0));
    }

    let mut start_line = start_line;
    let mut next_line = start_line;
    let mut prev_empty_end = false;
    let mut tight = true;

    while next_line < end_line {
        let content_start = state.skip_spaces(pos_after_marker);
        let max = state.e_marks[next_line];

        let mut indent_after_marker = if content_start >= max {
            1
        } else {
            content_start - pos_after_marker
        };
        if indent_after_marker > 4 {
            indent_after_marker = 1;
        }
        let indent = pos_after_marker - state.b_marks[next_line] + indent_after_marker;

        let item_idx = state.push_open(Token::with_map(TokenKind::ListItemOpen, start_line, 0));

        let old_indent = state.blk_indent;
        let old_tight = state.tight;
        let old_t_shift = state.t_shift[start_line];
        let old_parent = state.parent;
        state.t_shift[start_line] = (content_start - state.b_marks[start_line]) as isize;
        state.blk_indent = indent as isize;
        state.tight = true;
        state.parent = ParentType::List;

        tokenize(state, start_line, end_line);

        if !state.tight || prev_empty_end {
            tight = false;
        }
        // A list item ending in a blank line makes the list loose, unless
        // the blank line closed a nested block quote.
        prev_empty_end = state.line - start_line > 1
            && state.is_line_empty(state.line - 1)
            && !matches!(
                state.tokens.last().map(|t| &t.kind),
                Some(TokenKind::BlockquoteClose)
            );

        state.blk_indent = old_indent;
        state.t_shift[start_line] = old_t_shift;
        state.tight = old_tight;
        state.parent = old_parent;

        state.push_close(Token::new(TokenKind::ListItemClose));

        if state.line <= start_line {
            state.line = start_line + 1;
        }
        start_line = state.line;
        next_line = start_line;
        state.set_map_end(item_idx, next_line);

        if next_line >= end_line
            || state.is_line_empty(next_line)
            || state.t_shift[next_line] < state.blk_indent
        {
            break;
        }

        if any_rule_matches(state, TERMINATORS, next_line, end_line) {
            break;
        }

        let next_marker = if is_ordered {
            skip_ordered_marker(state, next_line)
        } else {
            skip_bullet_marker(state, next_line)
        };
        match next_marker {
            Some(pos) if state.byte(pos - 1) == marker_char => pos_after_marker = pos,
            _ => break,
        }
    }

    let close = if is_ordered {
        TokenKind::OrderedListClose
    } else {
        TokenKind::BulletListClose
    };
    state.push_close(Token::new(close));
    state.set_map_end(token_idx, next_line);
    state.line = next_line;

    if tight {
        mark_paragraphs_tight(state, token_idx);
    }
    true
}
