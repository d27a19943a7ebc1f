//! Line-oriented block parser.
//!
//! Block rules are tried in priority order on the current line. Each rule
//! receives `(state, start_line, end_line, silent)`; in silent mode it only
//! reports whether it would match and leaves the state untouched. Container
//! rules (block quotes, list items) adjust the line table in place and call
//! [`tokenize`] recursively over their content.

use crate::config::Config;
use crate::token::{Token, TokenKind};

use super::normalize::LineIndex;
use super::references::ReferenceRegistry;

mod blockquotes;
mod code_blocks;
mod headings;
mod horizontal_rules;
mod html_blocks;
mod lists;
mod paragraphs;
mod reference_definitions;
mod tables;

pub(crate) type BlockRule = fn(&mut BlockState<'_>, usize, usize, bool) -> bool;

/// Block rules in dispatch order. The paragraph rule always matches.
pub(crate) const BLOCK_RULES: &[(&str, BlockRule)] = &[
    ("code", code_blocks::indented_code),
    ("fence", code_blocks::fence),
    ("blockquote", blockquotes::blockquote),
    ("hr", horizontal_rules::hr),
    ("list", lists::list),
    ("reference", reference_definitions::reference),
    ("heading", headings::atx_heading),
    ("lheading", headings::setext_heading),
    ("html_block", html_blocks::html_block),
    ("table", tables::table),
    ("paragraph", paragraphs::paragraph),
];

/// Innermost container kind, used to end lists on two blank lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParentType {
    Root,
    List,
    BlockQuote,
}

pub(crate) struct BlockState<'a> {
    pub src: &'a str,
    /// Offset of the first byte of each line.
    pub b_marks: Vec<usize>,
    /// Offset of the end of each line, newline excluded.
    pub e_marks: Vec<usize>,
    /// Indent of each line; `-1` marks a lazy block-quote continuation.
    pub t_shift: Vec<isize>,
    /// Indent required for content of the current container.
    pub blk_indent: isize,
    pub line: usize,
    pub line_max: usize,
    /// Cleared when blank lines separate blocks inside a list item.
    pub tight: bool,
    pub parent: ParentType,
    pub level: usize,
    pub tokens: Vec<Token>,
    pub config: &'a Config,
    pub references: ReferenceRegistry,
}

impl<'a> BlockState<'a> {
    pub fn new(index: &'a LineIndex, config: &'a Config) -> Self {
        Self {
            src: &index.text,
            b_marks: index.b_marks.clone(),
            e_marks: index.e_marks.clone(),
            t_shift: index.t_shift.clone(),
            blk_indent: 0,
            line: 0,
            line_max: index.line_count(),
            tight: false,
            parent: ParentType::Root,
            level: 0,
            tokens: Vec::new(),
            config,
            references: ReferenceRegistry::new(),
        }
    }

    /// Byte at `pos`, or 0 past the end of the text.
    pub fn byte(&self, pos: usize) -> u8 {
        self.src.as_bytes().get(pos).copied().unwrap_or(0)
    }

    /// Start of the line's content, after its indent.
    pub fn content_start(&self, line: usize) -> usize {
        self.b_marks[line] + self.t_shift[line].max(0) as usize
    }

    pub fn is_line_empty(&self, line: usize) -> bool {
        self.b_marks[line] as isize + self.t_shift[line] >= self.e_marks[line] as isize
    }

    pub fn skip_empty_lines(&self, mut from: usize) -> usize {
        while from < self.line_max && self.is_line_empty(from) {
            from += 1;
        }
        from
    }

    pub fn skip_spaces(&self, pos: usize) -> usize {
        self.skip_bytes(pos, b' ')
    }

    pub fn skip_bytes(&self, mut pos: usize, b: u8) -> usize {
        let bytes = self.src.as_bytes();
        while pos < bytes.len() && bytes[pos] == b {
            pos += 1;
        }
        pos
    }

    /// Walk back over `b` from `pos`, stopping at `min`.
    pub fn skip_bytes_back(&self, mut pos: usize, b: u8, min: usize) -> usize {
        let bytes = self.src.as_bytes();
        while pos > min {
            pos -= 1;
            if bytes[pos] != b {
                return pos + 1;
            }
        }
        pos
    }

    /// Text of lines `begin..end`, each with up to `indent` columns of its
    /// indentation removed. The newline after the last line is kept only if
    /// `keep_last_lf` is set.
    pub fn lines(&self, begin: usize, end: usize, indent: isize, keep_last_lf: bool) -> String {
        let mut out = String::new();
        for line in begin..end {
            let shift = self.t_shift[line].clamp(0, indent.max(0)) as usize;
            let first = self.b_marks[line] + shift;
            let mut last = self.e_marks[line];
            if line + 1 < end || (keep_last_lf && last < self.src.len()) {
                last += 1;
            }
            if let Some(slice) = self.src.get(first..last.max(first)) {
                out.push_str(slice);
            }
        }
        out
    }

    pub fn push(&mut self, token: Token) -> usize {
        let mut token = token;
        token.level = self.level;
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    pub fn push_open(&mut self, token: Token) -> usize {
        let idx = self.push(token);
        self.level += 1;
        idx
    }

    pub fn push_close(&mut self, token: Token) -> usize {
        self.level = self.level.saturating_sub(1);
        self.push(token)
    }

    pub fn push_inline(&mut self, content: String, map: Option<[usize; 2]>) {
        let mut token = Token::new(TokenKind::Inline {
            content,
            children: Vec::new(),
        });
        token.map = map;
        self.push(token);
    }

    /// Patch the closing line of a token's source map.
    pub fn set_map_end(&mut self, idx: usize, end: usize) {
        if let Some(map) = self.tokens[idx].map.as_mut() {
            map[1] = end;
        }
    }
}

/// Run the block rules over lines `start_line..end_line`.
pub(crate) fn tokenize(state: &mut BlockState<'_>, start_line: usize, end_line: usize) {
    let mut line = start_line;
    let mut has_empty_lines = false;

    while line < end_line {
        line = state.skip_empty_lines(line);
        state.line = line;
        if line >= end_line {
            break;
        }

        if state.t_shift[line] < state.blk_indent {
            break;
        }

        if state.level >= state.config.max_nesting {
            log::trace!("block nesting limit reached at line {}", line);
            paragraphs::flat_paragraph(state, line, end_line);
            state.line = end_line;
            break;
        }

        for (name, rule) in BLOCK_RULES {
            if rule(state, line, end_line, false) {
                log::trace!("block rule {} matched at line {}", name, line);
                break;
            }
        }

        if state.line <= line {
            state.line = line + 1;
        }

        state.tight = !has_empty_lines;

        if state.is_line_empty(state.line - 1) {
            has_empty_lines = true;
        }

        line = state.line;

        if line < end_line && state.is_line_empty(line) {
            has_empty_lines = true;
            line += 1;

            if line < end_line && state.parent == ParentType::List && state.is_line_empty(line) {
                break;
            }
            state.line = line;
        }
    }
}

/// Parse the whole document into block tokens. `Inline` tokens come back
/// with their raw content and no children.
pub(crate) fn parse_blocks(index: &LineIndex, config: &Config) -> (Vec<Token>, ReferenceRegistry) {
    let mut state = BlockState::new(index, config);
    let line_max = state.line_max;
    tokenize(&mut state, 0, line_max);
    log::debug!(
        "block phase produced {} tokens from {} lines",
        state.tokens.len(),
        line_max
    );
    (state.tokens, state.references)
}

/// Run the given probes in silent mode on `line`.
pub(crate) fn any_rule_matches(
    state: &mut BlockState<'_>,
    rules: &[BlockRule],
    line: usize,
    end_line: usize,
) -> bool {
    rules.iter().any(|rule| rule(state, line, end_line, true))
}
