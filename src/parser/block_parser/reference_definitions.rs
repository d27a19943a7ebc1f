//! Link reference definitions: `[label]: destination "optional title"`.
//!
//! Definitions produce no tokens; they are recorded in the document's
//! reference registry. The first definition of a label wins.

use crate::parser::link_utils::{
    normalize_link, parse_link_destination, parse_link_title, validate_link,
};
use crate::utils::normalize_label;

use super::{BlockRule, BlockState, any_rule_matches};
use super::{blockquotes, code_blocks, headings, horizontal_rules, html_blocks, lists, tables};

/// Constructs that end a definition spanning several lines.
const TERMINATORS: &[BlockRule] = &[
    code_blocks::fence,
    blockquotes::blockquote,
    horizontal_rules::hr,
    lists::list,
    headings::atx_heading,
    html_blocks::html_block,
    tables::table,
];

/// A parsed definition and the number of newlines it spans.
struct Definition {
    label: String,
    href: String,
    title: String,
    lines: usize,
}

/// Parse a definition from the trimmed text of its lines.
fn parse_definition(s: &str) -> Option<Definition> {
    let bytes = s.as_bytes();
    let max = bytes.len();
    let mut lines = 0;

    let mut label_end = None;
    let mut pos = 1;
    while pos < max {
        match bytes[pos] {
            b'[' => return None,
            b']' => {
                label_end = Some(pos);
                break;
            }
            b'\n' => lines += 1,
            b'\\' => {
                pos += 1;
                if pos < max && bytes[pos] == b'\n' {
                    lines += 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }

    let label_end = label_end?;
    if label_end + 1 >= max || bytes[label_end + 1] != b':' {
        return None;
    }

    pos = label_end + 2;
    while pos < max {
        match bytes[pos] {
            b'\n' => lines += 1,
            b' ' => {}
            _ => break,
        }
        pos += 1;
    }

    let (href, end) = parse_link_destination(s, pos, max)?;
    let href = normalize_link(&href);
    if !validate_link(&href) {
        return None;
    }
    pos = end;

    let saved_pos = pos;
    let saved_lines = lines;

    // The title must be separated from the destination by whitespace.
    let title_start = pos;
    while pos < max {
        match bytes[pos] {
            b'\n' => lines += 1,
            b' ' => {}
            _ => break,
        }
        pos += 1;
    }

    let mut title = String::new();
    match parse_link_title(s, pos, max) {
        Some(parsed) if pos < max && title_start != pos => {
            title = parsed.title;
            pos = parsed.end;
            lines += parsed.lines;
        }
        _ => {
            pos = saved_pos;
            lines = saved_lines;
        }
    }

    while pos < max && bytes[pos] == b' ' {
        pos += 1;
    }
    if pos < max && bytes[pos] != b'\n' {
        return None;
    }

    let label = normalize_label(&s[1..label_end]);
    if label.is_empty() {
        return None;
    }

    Some(Definition {
        label,
        href,
        title,
        lines,
    })
}

pub(crate) fn reference(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    silent: bool,
) -> bool {
    let mut pos = state.content_start(start_line);
    if state.byte(pos) != b'[' {
        return false;
    }

    // On the first line, a closing bracket must be followed by a colon.
    pos += 1;
    let max = state.e_marks[start_line];
    while pos < max {
        if state.byte(pos) == b']' && state.byte(pos - 1) != b'\\' {
            if pos + 1 == max || state.byte(pos + 1) != b':' {
                return false;
            }
            break;
        }
        pos += 1;
    }

    let end_line = state.line_max;
    let mut next_line = start_line + 1;
    while next_line < end_line && !state.is_line_empty(next_line) {
        if state.t_shift[next_line] - state.blk_indent > 3 {
            next_line += 1;
            continue;
        }
        if any_rule_matches(state, TERMINATORS, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    let text = state.lines(start_line, next_line, state.blk_indent, false);
    let Some(definition) = parse_definition(text.trim()) else {
        return false;
    };
    if silent {
        return true;
    }

    log::trace!("reference definition [{}] -> {}", definition.label, definition.href);
    state
        .references
        .add(&definition.label, definition.href, definition.title);
    state.line = start_line + definition.lines + 1;
    true
}
