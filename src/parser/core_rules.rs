//! Passes that run once over the finished token stream, after inline
//! parsing. Each pass only touches the children of `Inline` tokens.

use crate::config::Config;
use crate::token::{Token, TokenKind};

mod linkify;
mod replacements;
mod smartquotes;

pub(crate) type CoreRule = fn(&mut [Token], &Config);

/// Core passes in the order they run.
pub(crate) const CORE_RULES: &[(&str, CoreRule)] = &[
    ("linkify", linkify::linkify),
    ("replacements", replacements::replacements),
    ("smartquotes", smartquotes::smartquotes),
];

pub(crate) fn run(tokens: &mut [Token], config: &Config) {
    for (name, rule) in CORE_RULES {
        log::trace!("running core rule {}", name);
        rule(tokens, config);
    }
}

/// Children lists of the `Inline` tokens in `tokens`.
fn inline_children(tokens: &mut [Token]) -> impl DoubleEndedIterator<Item = &mut Vec<Token>> {
    tokens.iter_mut().filter_map(|t| match &mut t.kind {
        TokenKind::Inline { children, .. } => Some(children),
        _ => None,
    })
}
