//! Raw HTML blocks. Only recognized when raw HTML is enabled.

use crate::token::{Token, TokenKind};

use super::BlockState;

/// Tag names that may start an HTML block.
const BLOCK_TAGS: &[&str] = &[
    "article",
    "aside",
    "blockquote",
    "body",
    "button",
    "canvas",
    "caption",
    "col",
    "colgroup",
    "dd",
    "div",
    "dl",
    "dt",
    "embed",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "iframe",
    "li",
    "map",
    "object",
    "ol",
    "output",
    "p",
    "pre",
    "progress",
    "script",
    "section",
    "style",
    "table",
    "tbody",
    "td",
    "textarea",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
    "video",
];

const MAX_TAG_NAME: usize = 15;

/// Lowercased tag name at the start of `s` (after `<`), with an optional
/// leading `/`. The name must end in a space, newline, `/` or `>`.
fn match_tag_name(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    let start = usize::from(bytes[0] == b'/');
    let mut i = start;
    let max = (start + MAX_TAG_NAME).min(bytes.len());
    while i < max && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    match bytes.get(i) {
        Some(b' ' | b'\n' | b'/' | b'>') => Some(s[start..i].to_ascii_lowercase()),
        _ => None,
    }
}

fn is_block_tag(name: &str) -> bool {
    BLOCK_TAGS.binary_search(&name).is_ok()
}

pub(crate) fn html_block(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    silent: bool,
) -> bool {
    if !state.config.html {
        return false;
    }

    let shift = state.t_shift[start_line];
    if !(0..=3).contains(&shift) {
        return false;
    }

    let pos = state.b_marks[start_line] + shift as usize;
    let max = state.e_marks[start_line];
    if pos + 2 >= max || state.byte(pos) != b'<' {
        return false;
    }

    match state.byte(pos + 1) {
        b'!' | b'?' => {}
        b'/' | b'a'..=b'z' | b'A'..=b'Z' => {
            let Some(tag) = match_tag_name(&state.src[pos + 1..max]) else {
                return false;
            };
            if !is_block_tag(&tag) {
                return false;
            }
        }
        _ => return false,
    }
    if silent {
        return true;
    }

    let mut next_line = start_line + 1;
    while next_line < state.line_max && !state.is_line_empty(next_line) {
        next_line += 1;
    }

    state.line = next_line;
    let content = state.lines(start_line, next_line, 0, true);
    state.push(Token::with_map(
        TokenKind::HtmlBlock { content },
        start_line,
        next_line,
    ));
    true
}
