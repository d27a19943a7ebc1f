//! Turn bare URLs, `www.` hosts and e-mail addresses in text into links.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::parser::link_utils::{normalize_link, normalize_link_text, validate_link};
use crate::token::{Token, TokenKind};

use super::inline_children;

static LINK_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        (?P<url>\b(?:https?|ftp)://[^\s<>]+)
        | (?P<mailto>\bmailto:[^\s<>@]+@[^\s<>]+)
        | (?P<www>\bwww\.[^\s<>]+)
        | (?P<email>\b[a-z0-9][a-z0-9._%+-]*@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,})
        | (?P<host>\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+
            (?:com|org|net|edu|gov|mil|int|io|dev|info|biz|app|me|co|uk|de|fr|ru|jp|cn|us|ca|au|eu)
            \b(?::[0-9]{1,5})?(?:/[^\s<>]*)?)
        ",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schema {
    /// The match carries its own scheme.
    Explicit,
    /// Host without a scheme; gets `http://`.
    Host,
    /// Bare e-mail address; gets `mailto:`.
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkMatch {
    start: usize,
    end: usize,
    schema: Schema,
}

/// Cut sentence punctuation and unbalanced `)` off the end of a match.
fn trim_trailing(url: &str) -> &str {
    let mut trimmed = url;
    loop {
        let before = trimmed.len();
        while let Some(last) = trimmed.chars().last()
            && matches!(last, '.' | ',' | ';' | ':' | '!' | '?' | '"' | '\'' | '*' | '_' | '~')
        {
            trimmed = &trimmed[..trimmed.len() - 1];
        }
        if trimmed.ends_with(')') {
            let open = trimmed.matches('(').count();
            let close = trimmed.matches(')').count();
            if close > open {
                trimmed = &trimmed[..trimmed.len() - 1];
            }
        }
        if trimmed.len() == before {
            return trimmed;
        }
    }
}

/// Whether the byte before `start` would glue the match onto a larger word.
fn glued_to_previous(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '/' | '-' | ':'))
}

fn find_links(text: &str) -> Vec<LinkMatch> {
    let bytes = text.as_bytes();
    if !bytes.contains(&b'.') && !bytes.contains(&b':') && !bytes.contains(&b'@') {
        return Vec::new();
    }

    let mut links = Vec::new();
    for caps in LINK_CANDIDATE.captures_iter(text) {
        let (m, schema) = if let Some(m) = caps.name("url").or_else(|| caps.name("mailto")) {
            (m, Schema::Explicit)
        } else if let Some(m) = caps.name("www").or_else(|| caps.name("host")) {
            (m, Schema::Host)
        } else if let Some(m) = caps.name("email") {
            (m, Schema::Email)
        } else {
            continue;
        };

        if schema != Schema::Explicit && glued_to_previous(text, m.start()) {
            continue;
        }

        let trimmed = trim_trailing(m.as_str());
        let min_len = match schema {
            Schema::Explicit => trimmed.find(':').map_or(usize::MAX, |i| i + 1),
            Schema::Host if trimmed.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) => 4,
            _ => 0,
        };
        if trimmed.len() <= min_len || trimmed.ends_with("://") {
            continue;
        }

        links.push(LinkMatch {
            start: m.start(),
            end: m.start() + trimmed.len(),
            schema,
        });
    }
    links
}

/// Split one text token into text and link tokens. Returns `None` when the
/// text contains no acceptable link.
fn split_text(text: &str, level: usize) -> Option<Vec<Token>> {
    let links = find_links(text);
    if links.is_empty() {
        return None;
    }

    let mut nodes = Vec::new();
    let mut last = 0;
    for link in links {
        let url_text = &text[link.start..link.end];
        let url = match link.schema {
            Schema::Explicit => url_text.to_string(),
            Schema::Host => format!("http://{url_text}"),
            Schema::Email => format!("mailto:{url_text}"),
        };
        let href = normalize_link(&url);
        if !validate_link(&href) {
            continue;
        }

        if link.start > last {
            nodes.push(leveled(Token::text(&text[last..link.start]), level));
        }
        nodes.push(leveled(
            Token::new(TokenKind::LinkOpen {
                href,
                title: String::new(),
            }),
            level,
        ));
        nodes.push(leveled(Token::text(normalize_link_text(url_text)), level + 1));
        nodes.push(leveled(Token::new(TokenKind::LinkClose), level));
        last = link.end;
    }

    if nodes.is_empty() {
        return None;
    }
    if last < text.len() {
        nodes.push(leveled(Token::text(&text[last..]), level));
    }
    Some(nodes)
}

fn leveled(mut token: Token, level: usize) -> Token {
    token.level = level;
    token
}

fn is_anchor_open(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes.len() > 2
        && bytes[1].eq_ignore_ascii_case(&b'a')
        && (bytes[2] == b'>' || bytes[2].is_ascii_whitespace())
}

fn is_anchor_close(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes.len() > 3
        && bytes[1] == b'/'
        && bytes[2].eq_ignore_ascii_case(&b'a')
        && html[3..].trim_start().starts_with('>')
}

fn linkify_children(children: &mut Vec<Token>) {
    let mut html_link_depth = 0usize;
    let mut i = children.len();

    while i > 0 {
        i -= 1;

        if children[i].kind == TokenKind::LinkClose {
            let level = children[i].level;
            while i > 0 {
                i -= 1;
                if children[i].level == level
                    && matches!(children[i].kind, TokenKind::LinkOpen { .. })
                {
                    break;
                }
            }
            continue;
        }

        if let TokenKind::HtmlInline { content } = &children[i].kind {
            if is_anchor_open(content) && html_link_depth > 0 {
                html_link_depth -= 1;
            }
            if is_anchor_close(content) {
                html_link_depth += 1;
            }
        }
        if html_link_depth > 0 {
            continue;
        }

        let TokenKind::Text { content } = &children[i].kind else {
            continue;
        };
        if let Some(nodes) = split_text(content, children[i].level) {
            children.splice(i..=i, nodes);
        }
    }
}

pub(super) fn linkify(tokens: &mut [Token], config: &Config) {
    if !config.linkify {
        return;
    }
    for children in inline_children(tokens) {
        linkify_children(children);
    }
}
