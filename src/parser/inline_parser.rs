//! Inline parser.
//!
//! Tokenizes the raw content of one `Inline` block token. Rules are tried in
//! priority order at the cursor; when none matches, one character is moved
//! into the pending text buffer. Pending text is flushed as a `Text` token
//! whenever another token is pushed and at the end of the span.

use std::collections::HashMap;

use crate::config::Config;
use crate::token::{Token, TokenKind};
use crate::utils::char_len_at;

use super::references::ReferenceRegistry;

mod autolinks;
mod code_spans;
mod emphasis;
mod escapes;
mod links;
mod raw_inline;
mod strikeout;
mod text;

pub(crate) type InlineRule = fn(&mut InlineState<'_>, bool) -> bool;

/// Inline rules in dispatch order.
pub(crate) const INLINE_RULES: &[(&str, InlineRule)] = &[
    ("text", text::text),
    ("newline", text::newline),
    ("escape", escapes::escape),
    ("backticks", code_spans::backticks),
    ("strikethrough", strikeout::strikethrough),
    ("emphasis", emphasis::emphasis),
    ("link", links::link),
    ("image", links::image),
    ("autolink", autolinks::autolink),
    ("html_inline", raw_inline::html_inline),
    ("entity", escapes::entity),
];

pub(crate) struct InlineState<'a> {
    pub src: &'a str,
    pub pos: usize,
    pub pos_max: usize,
    pub level: usize,
    /// Plain text not yet committed to a token.
    pub pending: String,
    pub pending_level: usize,
    pub tokens: Vec<Token>,
    /// Start position -> position after skipping one token there.
    cache: HashMap<usize, usize>,
    /// (closing marker, span end) -> start of a tail already scanned without
    /// finding a closer for that marker.
    no_closer: HashMap<(u8, usize), usize>,
    /// Nesting budget; below the configured limit for nested alt text.
    pub max_nesting: usize,
    pub config: &'a Config,
    pub references: &'a ReferenceRegistry,
}

impl<'a> InlineState<'a> {
    pub fn new(src: &'a str, config: &'a Config, references: &'a ReferenceRegistry) -> Self {
        Self {
            src,
            pos: 0,
            pos_max: src.len(),
            level: 0,
            pending: String::new(),
            pending_level: 0,
            tokens: Vec::new(),
            cache: HashMap::new(),
            no_closer: HashMap::new(),
            max_nesting: config.max_nesting,
            config,
            references,
        }
    }

    /// Byte at `pos`, or 0 past the end of the source.
    pub fn byte(&self, pos: usize) -> u8 {
        self.src.as_bytes().get(pos).copied().unwrap_or(0)
    }

    /// Whether a previous scan proved that no `marker` closer follows `pos`
    /// in the current span.
    pub fn closer_absent(&self, marker: u8, pos: usize) -> bool {
        self.no_closer
            .get(&(marker, self.pos_max))
            .is_some_and(|&from| pos >= from)
    }

    /// Record that the current span has no `marker` closer from `from` on.
    pub fn mark_closer_absent(&mut self, marker: u8, from: usize) {
        let entry = self.no_closer.entry((marker, self.pos_max)).or_insert(from);
        *entry = (*entry).min(from);
    }

    pub fn push_pending(&mut self) {
        let content = std::mem::take(&mut self.pending);
        let mut token = Token::text(content);
        token.level = self.pending_level;
        self.tokens.push(token);
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            self.push_pending();
        }
    }

    pub fn push(&mut self, kind: TokenKind) {
        self.flush_pending();
        let mut token = Token::new(kind);
        token.level = self.level;
        self.pending_level = self.level;
        self.tokens.push(token);
    }

    pub fn push_open(&mut self, kind: TokenKind) {
        self.flush_pending();
        let mut token = Token::new(kind);
        token.level = self.level;
        self.level += 1;
        self.pending_level = self.level;
        self.tokens.push(token);
    }

    pub fn push_close(&mut self, kind: TokenKind) {
        self.flush_pending();
        self.level = self.level.saturating_sub(1);
        let mut token = Token::new(kind);
        token.level = self.level;
        self.pending_level = self.level;
        self.tokens.push(token);
    }
}

/// Tokenize `state.src[state.pos..state.pos_max]`.
pub(crate) fn tokenize(state: &mut InlineState<'_>) {
    let max = state.pos_max;
    'outer: while state.pos < max {
        if state.level < state.max_nesting {
            for (_, rule) in INLINE_RULES {
                if rule(state, false) {
                    continue 'outer;
                }
            }
        } else {
            log::trace!("inline nesting limit reached at {}", state.pos);
        }

        let len = char_len_at(state.src, state.pos);
        if let Some(ch) = state.src.get(state.pos..state.pos + len) {
            state.pending.push_str(ch);
        }
        state.pos += len;
    }

    state.flush_pending();
}

/// Advance past one token at the cursor without emitting anything. Results
/// are memoized per start position.
pub(crate) fn skip_token(state: &mut InlineState<'_>) {
    let pos = state.pos;
    if let Some(&end) = state.cache.get(&pos) {
        state.pos = end;
        return;
    }

    // Probes run one level deeper, bounding recursive label scans.
    if state.level < state.max_nesting {
        state.level += 1;
        let matched = INLINE_RULES.iter().any(|(_, rule)| rule(state, true));
        state.level -= 1;
        if matched {
            state.cache.insert(pos, state.pos);
            return;
        }
    }

    state.pos += char_len_at(state.src, state.pos);
    state.cache.insert(pos, state.pos);
}

/// Parse an inline span into a flat token list. Nested constructs are
/// expressed through token levels; only images carry children.
pub(crate) fn parse_inline(src: &str, config: &Config, references: &ReferenceRegistry) -> Vec<Token> {
    if src.is_empty() {
        return Vec::new();
    }
    let mut state = InlineState::new(src, config, references);
    tokenize(&mut state);
    state.tokens
}
