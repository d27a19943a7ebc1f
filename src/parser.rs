//! Parser pipeline: normalize the input, split it into blocks, tokenize the
//! inline content of each block, then run the core passes.

use crate::config::Config;
use crate::token::{Token, TokenKind};

mod block_parser;
mod core_rules;
mod inline_parser;
pub mod link_utils;
mod normalize;
mod recognizers;
mod references;

pub use normalize::normalize;
pub use recognizers::{is_delimiter_row, match_autolink, match_email, match_html};
pub use references::{ReferenceDefinition, ReferenceRegistry};

/// Parse a document into its token stream.
///
/// Every input produces a stream; the stream is empty only when the input
/// holds no content at all.
///
/// # Examples
///
/// ```rust
/// use markit::{Config, parse};
///
/// let tokens = parse("# Title\n\nSome *text*.", &Config::default());
/// assert_eq!(tokens[0].kind.name(), "heading_open");
/// ```
pub fn parse(input: &str, config: &Config) -> Vec<Token> {
    parse_bytes(input.as_bytes(), config)
}

/// Like [`parse`], but accepts bytes that may not be valid UTF-8. Each
/// malformed byte becomes U+FFFD.
pub fn parse_bytes(input: &[u8], config: &Config) -> Vec<Token> {
    if input.is_empty() {
        return Vec::new();
    }

    let index = normalize::normalize_and_index(input);
    log::debug!(
        "normalized {} bytes into {} lines",
        index.text.len(),
        index.line_count()
    );

    let (mut tokens, references) = block_parser::parse_blocks(&index, config);
    log::debug!("collected {} reference definitions", references.len());

    let mut inline_count = 0;
    for token in &mut tokens {
        if let TokenKind::Inline { content, children } = &mut token.kind {
            *children = inline_parser::parse_inline(content, config, &references);
            inline_count += children.len();
        }
    }
    log::debug!("inline phase produced {} tokens", inline_count);

    core_rules::run(&mut tokens, config);
    tokens
}
