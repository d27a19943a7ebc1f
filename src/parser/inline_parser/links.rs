//! Links and images: inline `[text](dest "title")` and the full, collapsed
//! and shortcut reference forms.

use crate::parser::link_utils::{
    normalize_link, parse_link_destination, parse_link_title, validate_link,
};
use crate::token::TokenKind;
use crate::utils::skip_ws;

use super::{InlineState, skip_token, tokenize};

/// Find the `]` closing the label whose `[` is at `start`. Returns its
/// position. With `disable_nested`, a nested link inside the label fails.
pub(crate) fn parse_link_label(
    state: &mut InlineState<'_>,
    start: usize,
    disable_nested: bool,
) -> Option<usize> {
    if state.closer_absent(b']', start + 1) {
        return None;
    }
    let old_pos = state.pos;
    let max = state.pos_max;
    state.pos = start + 1;
    let mut level = 1;
    let mut label_end = None;
    let mut last_bracket = start + 1;

    while state.pos < max {
        let marker = state.byte(state.pos);
        if marker == b']' {
            last_bracket = state.pos + 1;
            level -= 1;
            if level == 0 {
                label_end = Some(state.pos);
                break;
            }
        }

        let prev_pos = state.pos;
        skip_token(state);

        if marker == b'[' {
            if prev_pos == state.pos - 1 {
                level += 1;
            } else if disable_nested {
                state.pos = old_pos;
                return None;
            }
        }
    }

    if label_end.is_none() {
        state.mark_closer_absent(b']', last_bracket);
    }
    state.pos = old_pos;
    label_end
}

/// Destination and title resolved from the text after a label.
struct Target {
    href: String,
    title: String,
    /// Position after the whole construct.
    end: usize,
}

/// Parse `(dest "title")` or a reference after the label `[label_start..label_end]`.
fn parse_target(state: &mut InlineState<'_>, label_start: usize, label_end: usize) -> Option<Target> {
    let src = state.src;
    let max = state.pos_max;
    let mut pos = label_end + 1;

    if pos < max && state.byte(pos) == b'(' {
        let bytes = src.as_bytes();
        pos = skip_ws(bytes, pos + 1, max);
        if pos >= max {
            return None;
        }

        let mut href = String::new();
        if let Some((url, end)) = parse_link_destination(src, pos, max) {
            let url = normalize_link(&url);
            if validate_link(&url) {
                href = url;
                pos = end;
            }
        }

        let start = pos;
        pos = skip_ws(bytes, pos, max);
        if pos >= max {
            return None;
        }

        let mut title = String::new();
        if start != pos
            && let Some(parsed) = parse_link_title(src, pos, max)
        {
            title = parsed.title;
            pos = skip_ws(bytes, parsed.end, max);
        }

        if pos >= max || state.byte(pos) != b')' {
            return None;
        }
        return Some(Target {
            href,
            title,
            end: pos + 1,
        });
    }

    if state.references.is_empty() {
        return None;
    }

    pos = skip_ws(src.as_bytes(), pos, max);
    let mut label = "";
    if pos < max && state.byte(pos) == b'[' {
        let start = pos + 1;
        match parse_link_label(state, pos, false) {
            Some(end) => {
                label = &src[start..end];
                pos = end + 1;
            }
            None => pos = label_end + 1,
        }
    } else {
        pos = label_end + 1;
    }
    if label.is_empty() {
        label = &src[label_start..label_end];
    }

    let definition = state.references.get(label)?;
    Some(Target {
        href: definition.href.clone(),
        title: definition.title.clone(),
        end: pos,
    })
}

pub(crate) fn link(state: &mut InlineState<'_>, silent: bool) -> bool {
    let start = state.pos;
    if state.byte(start) != b'[' {
        return false;
    }

    let max = state.pos_max;
    let label_start = start + 1;
    let Some(label_end) = parse_link_label(state, start, true) else {
        return false;
    };
    let Some(target) = parse_target(state, label_start, label_end) else {
        state.pos = start;
        return false;
    };

    if !silent {
        state.pos = label_start;
        state.pos_max = label_end;
        state.push_open(TokenKind::LinkOpen {
            href: target.href,
            title: target.title,
        });
        tokenize(state);
        state.push_close(TokenKind::LinkClose);
    }

    state.pos = target.end;
    state.pos_max = max;
    true
}

pub(crate) fn image(state: &mut InlineState<'_>, silent: bool) -> bool {
    let start = state.pos;
    let max = state.pos_max;
    if start + 2 >= max || state.byte(start) != b'!' || state.byte(start + 1) != b'[' {
        return false;
    }

    let label_start = start + 2;
    let Some(label_end) = parse_link_label(state, start + 1, false) else {
        return false;
    };
    let Some(target) = parse_target(state, label_start, label_end) else {
        state.pos = start;
        return false;
    };

    if !silent {
        // Alt text is parsed on its own, starting back at level 0.
        let src = state.src;
        let mut alt = InlineState::new(&src[label_start..label_end], state.config, state.references);
        alt.max_nesting = state.max_nesting.saturating_sub(state.level + 1);
        tokenize(&mut alt);
        state.push(TokenKind::Image {
            src: target.href,
            title: target.title,
            children: alt.tokens,
        });
    }

    state.pos = target.end;
    state.pos_max = max;
    true
}
