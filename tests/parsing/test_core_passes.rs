use markit::{Config, ConfigBuilder, TokenKind};

use super::helpers::*;

fn hrefs(src: &str, config: &Config) -> Vec<String> {
    first_inline(&tokens_with(src, config))
        .into_iter()
        .filter_map(|t| match t.kind {
            TokenKind::LinkOpen { href, .. } => Some(href),
            _ => None,
        })
        .collect()
}

#[test]
fn linkify_bare_urls() {
    let config = Config::default();
    similar_asserts::assert_eq!(
        hrefs("Visit https://example.com/docs, or www.rust-lang.org.", &config),
        ["https://example.com/docs", "http://www.rust-lang.org"]
    );
    similar_asserts::assert_eq!(
        hrefs("Write to team@example.com today", &config),
        ["mailto:team@example.com"]
    );
}

#[test]
fn linkify_skips_existing_links_and_code() {
    let config = Config::default();
    similar_asserts::assert_eq!(hrefs("[https://a.com](/x)", &config), ["/x"]);
    assert!(hrefs("`https://a.com`", &config).is_empty());
}

#[test]
fn linkify_can_be_disabled() {
    let config = ConfigBuilder::default().linkify(false).build();
    assert!(hrefs("https://example.com", &config).is_empty());
}

#[test]
fn typographic_replacements() {
    let children = first_inline(&tokens("(c) 2024 -- all rights... reserved---really?!!!!"));
    similar_asserts::assert_eq!(text(&children), "© 2024 – all rights… reserved—really?!!");
}

#[test]
fn smart_quotes_default_glyphs() {
    similar_asserts::assert_eq!(text(&first_inline(&tokens("\"foo\""))), "“foo”");
    similar_asserts::assert_eq!(text(&first_inline(&tokens("It's 'quoted'"))), "It’s ‘quoted’");
}

#[test]
fn smart_quotes_leave_inch_marks() {
    similar_asserts::assert_eq!(text(&first_inline(&tokens("5'10\""))), "5’10\"");
}

#[test]
fn smart_quotes_in_separate_paragraphs_do_not_pair() {
    let tokens = tokens("\"open\n\nclose\"");
    let texts: Vec<String> = inlines(&tokens).iter().map(|c| text(c)).collect();
    similar_asserts::assert_eq!(texts, ["\"open", "close\""]);
}

#[test]
fn typographer_off_keeps_source_text() {
    let config = ConfigBuilder::default().typographer(false).build();
    let src = "\"a\" -- (c) ...";
    let children = first_inline(&tokens_with(src, &config));
    similar_asserts::assert_eq!(text(&children), src);
}

#[test]
fn custom_quotes() {
    let config = ConfigBuilder::default().quotes("„“‚‘").build();
    let children = first_inline(&tokens_with("\"Hallo 'Welt'\"", &config));
    similar_asserts::assert_eq!(text(&children), "„Hallo ‚Welt‘“");
}
