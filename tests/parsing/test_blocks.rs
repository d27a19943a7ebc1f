use markit::{Align, Config, ConfigBuilder, TokenKind};

use super::helpers::*;

#[test]
fn heading_paragraph_and_rule() {
    let tokens = tokens("# Title\n\nSome text\n\n---\n");
    similar_asserts::assert_eq!(
        names(&tokens),
        [
            "heading_open",
            "inline",
            "heading_close",
            "paragraph_open",
            "inline",
            "paragraph_close",
            "hr"
        ]
    );
    similar_asserts::assert_eq!(tokens[0].kind, TokenKind::HeadingOpen { h_level: 1 });
    similar_asserts::assert_eq!(tokens[0].map, Some([0, 1]));
    similar_asserts::assert_eq!(tokens[6].map, Some([4, 5]));
}

#[test]
fn setext_heading() {
    let tokens = tokens("Title\n=====\n\nSub\n---\n");
    similar_asserts::assert_eq!(tokens[0].kind, TokenKind::HeadingOpen { h_level: 1 });
    similar_asserts::assert_eq!(tokens[3].kind, TokenKind::HeadingOpen { h_level: 2 });
    similar_asserts::assert_eq!(text(&first_inline(&tokens)), "Title");
}

#[test]
fn fenced_code_keeps_content_verbatim() {
    let tokens = tokens("```rust\nfn main() { *x* }\n```\n");
    similar_asserts::assert_eq!(
        tokens[0].kind,
        TokenKind::Fence {
            params: "rust".to_string(),
            content: "fn main() { *x* }\n".to_string()
        }
    );
    similar_asserts::assert_eq!(tokens.len(), 1);
}

#[test]
fn indented_code() {
    let tokens = tokens("    let x = 1;\n    let y = 2;\n");
    similar_asserts::assert_eq!(
        tokens[0].kind,
        TokenKind::CodeBlock {
            content: "let x = 1;\nlet y = 2;\n".to_string()
        }
    );
}

#[test]
fn tabs_expand_into_code_indent() {
    let tokens = tokens("\tcode\n");
    similar_asserts::assert_eq!(
        tokens[0].kind,
        TokenKind::CodeBlock {
            content: "code\n".to_string()
        }
    );
}

#[test]
fn blockquote_with_lazy_line() {
    let tokens = tokens("> quoted\nlazy\n\nafter\n");
    similar_asserts::assert_eq!(
        names(&tokens),
        [
            "blockquote_open",
            "paragraph_open",
            "inline",
            "paragraph_close",
            "blockquote_close",
            "paragraph_open",
            "inline",
            "paragraph_close"
        ]
    );
    similar_asserts::assert_eq!(inline_contents(&tokens), ["quoted\nlazy", "after"]);
}

#[test]
fn tight_and_loose_lists() {
    let tight = tokens("- a\n- b\n");
    let flags: Vec<bool> = tight
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::ParagraphOpen { tight } => Some(tight),
            _ => None,
        })
        .collect();
    similar_asserts::assert_eq!(flags, [true, true]);

    let loose = tokens("- a\n\n- b\n");
    assert!(loose.iter().all(|t| !matches!(
        t.kind,
        TokenKind::ParagraphOpen { tight: true }
    )));
}

#[test]
fn ordered_list_start_number() {
    let tokens = tokens("7. seven\n8. eight\n");
    similar_asserts::assert_eq!(tokens[0].kind, TokenKind::OrderedListOpen { order: 7 });
    similar_asserts::assert_eq!(
        names(&tokens)
            .iter()
            .filter(|n| **n == "list_item_open")
            .count(),
        2
    );
}

#[test]
fn table_alignments() {
    let none = tokens("a|b\n-|-\n");
    let aligns = |tokens: &[markit::Token]| -> Vec<Align> {
        tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::ThOpen { align } => Some(align),
                _ => None,
            })
            .collect()
    };
    similar_asserts::assert_eq!(names(&none)[0], "table_open");
    similar_asserts::assert_eq!(aligns(&none), [Align::None, Align::None]);

    let sided = tokens("a|b\n:-|-:\n");
    similar_asserts::assert_eq!(aligns(&sided), [Align::Left, Align::Right]);
}

#[test]
fn table_rows_take_column_count_from_delimiter() {
    let tokens = tokens("| a | b |\n| --- | --- |\n| 1 |\n| 1 | 2 | 3 |\n");
    let cells = names(&tokens)
        .iter()
        .filter(|n| **n == "td_open")
        .count();
    similar_asserts::assert_eq!(cells, 4);
}

#[test]
fn tables_can_be_disabled() {
    let config = ConfigBuilder::default().tables(false).build();
    let tokens = tokens_with("a|b\n-|-\n", &config);
    similar_asserts::assert_eq!(names(&tokens)[0], "paragraph_open");
}

#[test]
fn html_block_requires_option() {
    let src = "<div>\n*hi*\n</div>\n";
    let plain = tokens(src);
    similar_asserts::assert_eq!(names(&plain)[0], "paragraph_open");

    let config = Config {
        html: true,
        ..Config::default()
    };
    let html = tokens_with(src, &config);
    similar_asserts::assert_eq!(
        html[0].kind,
        TokenKind::HtmlBlock {
            content: "<div>\n*hi*\n</div>\n".to_string()
        }
    );
}

#[test]
fn reference_definition_produces_no_tokens() {
    let tokens = tokens("[foo]: /url \"title\"\n");
    assert!(tokens.is_empty());
}

#[test]
fn crlf_and_cr_line_endings() {
    let unix = tokens("a\nb\n\nc\n");
    similar_asserts::assert_eq!(tokens("a\r\nb\r\n\r\nc\r\n"), unix);
    similar_asserts::assert_eq!(tokens("a\rb\r\rc\r"), unix);
}
