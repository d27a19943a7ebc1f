use markit::{Config, ConfigBuilder, RenderOptions, Token, TokenKind, render_to_string};

use super::helpers::*;

/// Inline children of a one-paragraph document, with typography off so the
/// text comes back exactly as written.
fn plain_inline(src: &str) -> Vec<Token> {
    let config = ConfigBuilder::default()
        .typographer(false)
        .linkify(false)
        .build();
    first_inline(&tokens_with(src, &config))
}

#[test]
fn emphasis_and_strong() {
    similar_asserts::assert_eq!(
        names(&plain_inline("*foo*")),
        ["em_open", "text", "em_close"]
    );
    similar_asserts::assert_eq!(
        names(&plain_inline("**foo**")),
        ["strong_open", "text", "strong_close"]
    );
    similar_asserts::assert_eq!(text(&plain_inline("**foo**")), "foo");
}

#[test]
fn intraword_underscore_is_literal() {
    let children = plain_inline("foo_bar_baz");
    similar_asserts::assert_eq!(children, [Token::text("foo_bar_baz")]);
}

#[test]
fn closer_after_space_is_literal() {
    let children = plain_inline("*foo *");
    similar_asserts::assert_eq!(names(&children), ["text"]);
    similar_asserts::assert_eq!(text(&children), "*foo *");
}

#[test]
fn mixed_emphasis_nesting() {
    let children = plain_inline("***both***");
    similar_asserts::assert_eq!(
        names(&children),
        ["strong_open", "em_open", "text", "em_close", "strong_close"]
    );
    assert!(markit::token::is_balanced(&children));
}

#[test]
fn strikethrough_needs_double_tilde() {
    similar_asserts::assert_eq!(
        names(&plain_inline("~~gone~~")),
        ["s_open", "text", "s_close"]
    );
    similar_asserts::assert_eq!(names(&plain_inline("~kept~")), ["text"]);
}

#[test]
fn unequal_backticks_stay_literal() {
    let children = plain_inline("`a``b`");
    assert!(
        !children
            .iter()
            .any(|t| matches!(t.kind, TokenKind::CodeInline { .. }))
    );
    similar_asserts::assert_eq!(text(&children), "`a``b`");
}

#[test]
fn code_span_content() {
    let children = plain_inline("`` a `b` ``");
    similar_asserts::assert_eq!(
        children,
        [Token {
            kind: TokenKind::CodeInline {
                content: "a `b`".to_string()
            },
            level: 0,
            map: None
        }]
    );
}

#[test]
fn link_with_angle_destination() {
    let children = plain_inline("[text](<my url>)");
    similar_asserts::assert_eq!(
        children[0].kind,
        TokenKind::LinkOpen {
            href: "my%20url".to_string(),
            title: String::new()
        }
    );
}

#[test]
fn unbalanced_destination_is_literal() {
    let children = plain_inline("[text](a(b)c)");
    similar_asserts::assert_eq!(children, [Token::text("[text](a(b)c)")]);
}

#[test]
fn balanced_parens_end_destination() {
    let children = plain_inline("[a](foo(bar))");
    similar_asserts::assert_eq!(
        children[0].kind,
        TokenKind::LinkOpen {
            href: "foo(bar)".to_string(),
            title: String::new()
        }
    );
    similar_asserts::assert_eq!(names(&children), ["link_open", "text", "link_close"]);
}

#[test]
fn parenthesized_url_is_one_link() {
    let html = render_to_string(
        "[link](https://en.wikipedia.org/wiki/Foo_(bar))",
        &Config::default(),
        &RenderOptions::default(),
    );
    similar_asserts::assert_eq!(
        html,
        "<p><a href=\"https://en.wikipedia.org/wiki/Foo_(bar)\">link</a></p>\n"
    );
}

#[test]
fn reference_resolves_and_first_definition_wins() {
    let src = "[Label]\n\n[label]: /url \"title\"\n[LABEL]: /other\n";
    let children = plain_inline(src);
    similar_asserts::assert_eq!(
        children[0].kind,
        TokenKind::LinkOpen {
            href: "/url".to_string(),
            title: "title".to_string()
        }
    );
    similar_asserts::assert_eq!(text(&children), "Label");
}

#[test]
fn image_alt_children() {
    let children = plain_inline("![a **b**](/img.png)");
    let Some(TokenKind::Image { src, children, .. }) = children.first().map(|t| &t.kind) else {
        panic!("expected an image, got {children:?}");
    };
    similar_asserts::assert_eq!(src, "/img.png");
    similar_asserts::assert_eq!(text(children), "a b");
}

#[test]
fn hard_and_soft_breaks() {
    similar_asserts::assert_eq!(
        names(&plain_inline("a  \nb\nc\\\nd")),
        ["text", "hardbreak", "text", "softbreak", "text", "hardbreak", "text"]
    );
}

#[test]
fn entities_and_escapes() {
    similar_asserts::assert_eq!(text(&plain_inline("&amp; &copy; &#35; &#x41; &bogus;")), "& © # A &bogus;");
    similar_asserts::assert_eq!(text(&plain_inline(r"\*\_\\")), r"*_\");
}

#[test]
fn autolinks() {
    let children = plain_inline("<https://example.com> and <me@example.com>");
    let hrefs: Vec<&str> = children
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::LinkOpen { href, .. } => Some(href.as_str()),
            _ => None,
        })
        .collect();
    similar_asserts::assert_eq!(hrefs, ["https://example.com", "mailto:me@example.com"]);
}

#[test]
fn raw_html_only_when_enabled() {
    let config = Config {
        html: true,
        ..Config::default()
    };
    let children = first_inline(&tokens_with("a <em>b</em>", &config));
    similar_asserts::assert_eq!(names(&children), ["text", "html_inline", "text", "html_inline"]);

    similar_asserts::assert_eq!(names(&plain_inline("a <em>b</em>")), ["text"]);
}

#[test]
fn table_cells_are_parsed_inline() {
    let tokens = tokens("| *a* | `b` |\n|---|---|\n");
    let cells = inlines(&tokens);
    similar_asserts::assert_eq!(names(cells[0]), ["em_open", "text", "em_close"]);
    similar_asserts::assert_eq!(names(cells[1]), ["code_inline"]);
}
