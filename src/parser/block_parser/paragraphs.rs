//! Paragraphs, the fallback block rule.

use crate::token::{Token, TokenKind};

use super::{BlockRule, BlockState, any_rule_matches};
use super::{blockquotes, code_blocks, headings, horizontal_rules, html_blocks, lists, tables};

/// Constructs that interrupt a paragraph.
const TERMINATORS: &[BlockRule] = &[
    code_blocks::fence,
    blockquotes::blockquote,
    horizontal_rules::hr,
    lists::list,
    headings::atx_heading,
    html_blocks::html_block,
    tables::table,
];

fn push_paragraph(state: &mut BlockState<'_>, content: String, start_line: usize, end_line: usize) {
    state.push_open(Token::with_map(
        TokenKind::ParagraphOpen { tight: false },
        start_line,
        end_line,
    ));
    state.push_inline(content, Some([start_line, end_line]));
    state.push_close(Token::with_map(
        TokenKind::ParagraphClose { tight: false },
        start_line,
        end_line,
    ));
}

pub(crate) fn paragraph(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    _silent: bool,
) -> bool {
    // Lazy continuation lines may lie past the current container.
    let end_line = state.line_max;
    let mut next_line = start_line + 1;
    while next_line < end_line && !state.is_line_empty(next_line) {
        let shift = state.t_shift[next_line];
        if shift < 0 || shift - state.blk_indent > 3 {
            next_line += 1;
            continue;
        }
        if any_rule_matches(state, TERMINATORS, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    let content = state
        .lines(start_line, next_line, state.blk_indent, false)
        .trim()
        .to_string();
    state.line = next_line;
    push_paragraph(state, content, start_line, next_line);
    true
}

/// Emit everything from `start_line` to `end_line` as one paragraph of raw
/// text. Used once the nesting limit stops structural parsing.
pub(crate) fn flat_paragraph(state: &mut BlockState<'_>, start_line: usize, end_line: usize) {
    let content = state
        .lines(start_line, end_line, state.blk_indent, false)
        .trim()
        .to_string();
    if content.is_empty() {
        return;
    }
    push_paragraph(state, content, start_line, end_line);
}
