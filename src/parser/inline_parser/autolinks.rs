//! `<scheme:...>` and `<user@host>` autolinks.

use crate::parser::link_utils::{normalize_link, normalize_link_text, validate_link};
use crate::parser::recognizers::{match_autolink, match_email};
use crate::token::TokenKind;

use super::InlineState;

pub(crate) fn autolink(state: &mut InlineState<'_>, silent: bool) -> bool {
    let pos = state.pos;
    if state.byte(pos) != b'<' {
        return false;
    }

    let src = state.src;
    let tail = &src[pos..state.pos_max];
    if !tail.contains('>') {
        return false;
    }

    if let Some(link) = match_autolink(tail) {
        let href = normalize_link(link);
        if !validate_link(&href) {
            return false;
        }
        if !silent {
            push_link(state, href, normalize_link_text(link));
        }
        state.pos += link.len() + 2;
        return true;
    }

    if let Some(email) = match_email(tail) {
        let href = normalize_link(&format!("mailto:{email}"));
        if !validate_link(&href) {
            return false;
        }
        if !silent {
            push_link(state, href, email.to_string());
        }
        state.pos += email.len() + 2;
        return true;
    }

    false
}

fn push_link(state: &mut InlineState<'_>, href: String, text: String) {
    state.push_open(TokenKind::LinkOpen {
        href,
        title: String::new(),
    });
    state.push(TokenKind::Text { content: text });
    state.push_close(TokenKind::LinkClose);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::token::TokenKind;

    fn href(tokens: &[crate::token::Token]) -> Option<&str> {
        tokens.iter().find_map(|t| match &t.kind {
            TokenKind::LinkOpen { href, .. } => Some(href.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_uri_autolink() {
        let tokens = inline("<http://example.com/a?b=c>");
        assert_eq!(names(&tokens), ["link_open", "text", "link_close"]);
        assert_eq!(href(&tokens), Some("http://example.com/a?b=c"));
        assert_eq!(text_of(&tokens), "http://example.com/a?b=c");
        assert_eq!(tokens[1].level, 1);
    }

    #[test]
    fn test_any_scheme_is_accepted() {
        let tokens = inline("<irc://foo.bar:2233/baz>");
        assert_eq!(href(&tokens), Some("irc://foo.bar:2233/baz"));
    }

    #[test]
    fn test_email_autolink() {
        let tokens = inline("<foo@bar.example.com>");
        assert_eq!(href(&tokens), Some("mailto:foo@bar.example.com"));
        assert_eq!(text_of(&tokens), "foo@bar.example.com");
    }

    #[test]
    fn test_display_text_is_percent_decoded() {
        let tokens = inline("<http://a.b/%C3%A9>");
        assert_eq!(href(&tokens), Some("http://a.b/%C3%A9"));
        assert_eq!(text_of(&tokens), "http://a.b/é");
    }

    #[test]
    fn test_unsafe_scheme_is_text() {
        let tokens = inline("<javascript:alert(1)>");
        assert_eq!(href(&tokens), None);
        assert_eq!(text_of(&tokens), "<javascript:alert(1)>");
    }

    #[test]
    fn test_space_breaks_autolink() {
        let tokens = inline("<http://a b>");
        assert_eq!(href(&tokens), None);
    }
}
