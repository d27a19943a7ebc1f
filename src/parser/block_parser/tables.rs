//! Pipe tables: a header row, a delimiter row, then body rows until a line
//! without a pipe.

use crate::parser::recognizers::is_delimiter_row;
use crate::token::{Align, Token, TokenKind};

use super::BlockState;

/// Line text starting at the container's content indent.
fn get_line<'s>(state: &BlockState<'s>, line: usize) -> &'s str {
    let src = state.src;
    let mut pos = state.b_marks[line] + state.blk_indent.max(0) as usize;
    let max = state.e_marks[line];
    while pos < max && !src.is_char_boundary(pos) {
        pos += 1;
    }
    if pos >= max {
        return "";
    }
    &src[pos..max]
}

/// Split a row on unescaped pipes outside code spans. A leading and a
/// trailing pipe are dropped first.
pub(crate) fn escaped_split(s: &str) -> Vec<&str> {
    let mut s = s;
    if let Some(stripped) = s.strip_suffix('|') {
        s = stripped;
    }
    let bytes = s.as_bytes();

    let mut result = Vec::new();
    let mut pos = 0;
    let mut last_pos = 0;
    if bytes.first() == Some(&b'|') {
        pos = 1;
        last_pos = 1;
    }

    let mut escapes = 0;
    let mut backticked = false;
    let mut last_backtick = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'`' if escapes % 2 == 0 => {
                backticked = !backticked;
                last_backtick = pos;
            }
            b'|' if escapes % 2 == 0 && !backticked => {
                result.push(&s[last_pos..pos]);
                last_pos = pos + 1;
            }
            b'\\' => escapes += 1,
            _ => escapes = 0,
        }
        pos += 1;

        // An unclosed code span does not protect pipes; rescan after it.
        if pos == bytes.len() && backticked {
            backticked = false;
            pos = last_backtick + 1;
        }
    }
    result.push(&s[last_pos..]);
    result
}

fn column_align(cell: &str) -> Align {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Align::Center,
        (false, true) => Align::Right,
        (true, false) => Align::Left,
        (false, false) => Align::None,
    }
}

pub(crate) fn table(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    silent: bool,
) -> bool {
    if !state.config.tables || start_line + 2 > end_line {
        return false;
    }

    let next_line = start_line + 1;
    let shift = state.t_shift[next_line];
    if shift < state.blk_indent {
        return false;
    }
    let pos = state.b_marks[next_line] + shift as usize;
    if pos >= state.e_marks[next_line] || !matches!(state.byte(pos), b'-' | b':' | b'|' | b' ') {
        return false;
    }

    let delimiter = get_line(state, next_line);
    if !is_delimiter_row(delimiter) || !delimiter.contains('|') {
        return false;
    }
    let aligns: Vec<Align> = delimiter
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(column_align)
        .collect();

    let header = get_line(state, start_line).trim();
    if !header.contains('|') {
        return false;
    }
    let header_cells = escaped_split(header);
    if header_cells.len() != aligns.len() {
        return false;
    }
    if silent {
        return true;
    }

    let table_idx = state.push_open(Token::with_map(TokenKind::TableOpen, start_line, 0));
    state.push_open(Token::with_map(TokenKind::TheadOpen, start_line, start_line + 1));
    state.push_open(Token::with_map(TokenKind::TrOpen, start_line, start_line + 1));
    for (cell, &align) in header_cells.iter().zip(&aligns) {
        state.push_open(Token::with_map(
            TokenKind::ThOpen { align },
            start_line,
            start_line + 1,
        ));
        state.push_inline(cell.trim().to_string(), Some([start_line, start_line + 1]));
        state.push_close(Token::new(TokenKind::ThClose));
    }
    state.push_close(Token::new(TokenKind::TrClose));
    state.push_close(Token::new(TokenKind::TheadClose));

    let tbody_idx = state.push_open(Token::with_map(TokenKind::TbodyOpen, start_line + 2, 0));

    let mut line = start_line + 2;
    while line < end_line {
        let shift = state.t_shift[line];
        if shift >= 0 && shift < state.blk_indent {
            break;
        }

        let row = get_line(state, line).trim();
        if !row.contains('|') {
            break;
        }
        let mut cells = escaped_split(row);
        cells.resize(aligns.len(), "");

        state.push_open(Token::with_map(TokenKind::TrOpen, line, line + 1));
        for (cell, &align) in cells.iter().zip(&aligns) {
            state.push_open(Token::new(TokenKind::TdOpen { align }));
            state.push_inline(cell.trim().to_string(), None);
            state.push_close(Token::new(TokenKind::TdClose));
        }
        state.push_close(Token::new(TokenKind::TrClose));
        line += 1;
    }

    state.push_close(Token::new(TokenKind::TbodyClose));
    state.push_close(Token::new(TokenKind::TableClose));
    state.set_map_end(table_idx, line);
    state.set_map_end(tbody_idx, line);
    state.line = line;
    true
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::Config;

    fn aligns(tokens: &[Token]) -> Vec<Align> {
        tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::ThOpen { align } => Some(align),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_escaped_split() {
        assert_eq!(escaped_split("| a | b |"), [" a ", " b "]);
        assert_eq!(escaped_split("a|b"), ["a", "b"]);
        assert_eq!(escaped_split(r"a \| b|c"), [r"a \| b", "c"]);
        assert_eq!(escaped_split("`a|b`|c"), ["`a|b`", "c"]);
        assert_eq!(escaped_split("`a|b"), ["`a", "b"]);
    }

    #[test]
    fn test_simple_table() {
        let tokens = blocks("a|b\n-|-\n1|2\n");
        assert_eq!(
            names(&tokens),
            [
                "table_open",
                "thead_open",
                "tr_open",
                "th_open",
                "inline",
                "th_close",
                "th_open",
                "inline",
                "th_close",
                "tr_close",
                "thead_close",
                "tbody_open",
                "tr_open",
                "td_open",
                "inline",
                "td_close",
                "td_open",
                "inline",
                "td_close",
                "tr_close",
                "tbody_close",
                "table_close"
            ]
        );
        assert_eq!(aligns(&tokens), [Align::None, Align::None]);
        assert_eq!(inline_contents(&tokens), ["a", "b", "1", "2"]);
        assert_eq!(tokens[0].map, Some([0, 3]));
    }

    #[test]
    fn test_alignment() {
        let tokens = blocks("a|b|c\n:-|-:|:-:\n");
        assert_eq!(aligns(&tokens), [Align::Left, Align::Right, Align::Center]);
    }

    #[test]
    fn test_rows_padded_and_truncated() {
        let tokens = blocks("| a | b |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |\n");
        assert_eq!(inline_contents(&tokens), ["a", "b", "1", "", "1", "2"]);
    }

    #[test]
    fn test_header_cell_count_must_match() {
        let tokens = blocks("a|b|c\n-|-\n");
        assert_eq!(names(&tokens)[0], "paragraph_open");
    }

    #[test]
    fn test_delimiter_needs_pipe() {
        let tokens = blocks("a|b\n---\n");
        assert_ne!(names(&tokens)[0], "table_open");
    }

    #[test]
    fn test_body_ends_at_line_without_pipe() {
        let tokens = blocks("a|b\n-|-\n1|2\nplain\n");
        assert_eq!(inline_contents(&tokens).last(), Some(&"plain"));
        assert_eq!(names(&tokens)[21], "table_close");
    }

    #[test]
    fn test_tables_disabled() {
        let config = Config {
            tables: false,
            ..Config::default()
        };
        let tokens = blocks_with("a|b\n-|-\n", &config);
        assert_eq!(names(&tokens)[0], "paragraph_open");
    }
}
