use markit::{Config, Token, TokenKind, parse};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn tokens(src: &str) -> Vec<Token> {
    tokens_with(src, &Config::default())
}

pub fn tokens_with(src: &str, config: &Config) -> Vec<Token> {
    init_logger();
    parse(src, config)
}

pub fn names(tokens: &[Token]) -> Vec<&'static str> {
    tokens.iter().map(|t| t.kind.name()).collect()
}

/// Children of every inline token, in document order.
pub fn inlines(tokens: &[Token]) -> Vec<&[Token]> {
    tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Inline { .. }))
        .filter_map(|t| t.children())
        .collect()
}

/// Children of the first inline token.
pub fn first_inline(tokens: &[Token]) -> Vec<Token> {
    inlines(tokens).first().map(|c| c.to_vec()).unwrap_or_default()
}

/// Concatenated text content of a children list.
pub fn text(children: &[Token]) -> String {
    children
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::Text { content } => Some(content.as_str()),
            _ => None,
        })
        .collect()
}

/// Raw content of every inline token, before inline parsing.
pub fn inline_contents(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::Inline { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect()
}
