use std::thread;
use std::time::{Duration, Instant};

use markit::parser::normalize;
use markit::token::is_balanced;
use markit::{Config, ConfigBuilder, Token, TokenKind, parse_bytes};

use super::helpers::*;

const SAMPLES: &[&str] = &[
    "# h\n\npara *em* **strong** ~~del~~ `code`\n",
    "> quote\n> - item\n>   > nested\n\nafter\n",
    "1. one\n2. two\n   - sub\n\n   para in item\n3. three\n",
    "| a | b |\n|:-:|--|\n| *x* | [l](/u) |\n",
    "```\nunterminated fence\n",
    "[ref]: /u 'T'\n\n[ref] and [text][ref] and ![img][ref]\n",
    "*unclosed **mixed _delims ~~everywhere\n",
    "<div>\n\n</div>\n<!-- c --> <b>x</b>\n",
    "a  \nb\\\nc\n\n---\n***\n___\n",
    "- \n-\n  - a\n\n\n- b\n",
];

fn all_configs() -> Vec<Config> {
    vec![
        Config::default(),
        ConfigBuilder::default()
            .html(true)
            .typographer(false)
            .build(),
        ConfigBuilder::default()
            .tables(false)
            .linkify(false)
            .max_nesting(3)
            .build(),
    ]
}

#[test]
fn token_streams_are_balanced() {
    init_logger();
    for config in all_configs() {
        for src in SAMPLES {
            let tokens = tokens_with(src, &config);
            assert!(is_balanced(&tokens), "unbalanced for {src:?}: {tokens:#?}");
        }
    }
}

#[test]
fn plain_prose_round_trips() {
    let src = "  Just some plain words here  ";
    let tokens = tokens(src);
    similar_asserts::assert_eq!(
        names(&tokens),
        ["paragraph_open", "inline", "paragraph_close"]
    );
    similar_asserts::assert_eq!(first_inline(&tokens), [Token::text(src.trim())]);
}

#[test]
fn normalization_is_idempotent() {
    let inputs: &[&[u8]] = &[
        b"a\r\nb\rc\n",
        b"\tx\n  \ty\n",
        b"nul\0byte",
        b"bad \xff\xfe utf8",
        b"",
    ];
    for input in inputs {
        let once = normalize(input);
        similar_asserts::assert_eq!(normalize(once.as_bytes()), once);
    }
}

#[test]
fn block_nesting_beyond_limit_degrades() {
    let config = ConfigBuilder::default().max_nesting(4).build();
    let src = format!("{} deep\n", ">".repeat(50));
    let tokens = tokens_with(&src, &config);
    assert!(is_balanced(&tokens));
    let opens = names(&tokens).iter().filter(|n| **n == "blockquote_open").count();
    similar_asserts::assert_eq!(opens, 4);
    similar_asserts::assert_eq!(names(&tokens).last(), Some(&"blockquote_close"));
}

#[test]
fn inline_nesting_beyond_limit_degrades() {
    let config = ConfigBuilder::default().max_nesting(3).build();
    let src = format!("{}x{}", "*a ".repeat(20), " b*".repeat(20));
    let tokens = tokens_with(&src, &config);
    assert!(is_balanced(&tokens));
    let children = first_inline(&tokens);
    assert!(children.iter().all(|t| t.level <= 3));
}

#[test]
fn pathological_inputs_complete() {
    let inputs = [
        "[".repeat(5_000),
        "*a".repeat(5_000),
        "> ".repeat(2_000),
        "- ".repeat(2_000),
        "`".repeat(3_000),
        "<".repeat(3_000),
        "\\".repeat(3_000),
        "~~".repeat(3_000),
    ];
    for input in &inputs {
        let tokens = tokens(input);
        assert!(is_balanced(&tokens));
    }
}

#[test]
fn only_empty_input_gives_no_tokens() {
    assert!(tokens("").is_empty());
    assert!(!tokens("x").is_empty());
}

#[test]
fn invalid_utf8_never_fails() {
    init_logger();
    let tokens = parse_bytes(b"*\xc3(\xff*", &Config::default());
    let children = first_inline(&tokens);
    similar_asserts::assert_eq!(text(&children), "\u{FFFD}(\u{FFFD}");
    assert!(matches!(children[0].kind, TokenKind::EmphasisOpen));
}

#[test]
fn parses_concurrently() {
    init_logger();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let src = format!("# doc {i}\n\n- *item* {i}\n");
                markit::parse(&src, &Config::default())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let tokens = handle.join().unwrap_or_default();
        similar_asserts::assert_eq!(inline_contents(&tokens)[0], format!("doc {i}"));
    }
}

fn parse_time(src: &str) -> Duration {
    let config = Config::default();
    let start = Instant::now();
    let tokens = parse_bytes(src.as_bytes(), &config);
    let elapsed = start.elapsed();
    assert!(is_balanced(&tokens));
    elapsed
}

#[test]
fn unmatched_openers_scale_linearly() {
    init_logger();
    for unit in ["*a ", "_a_b ", "~~a ", "["] {
        // Warm up allocations before timing.
        parse_time(&unit.repeat(1_000));
        let small = parse_time(&unit.repeat(5_000));
        let large = parse_time(&unit.repeat(20_000));
        let ratio = large.as_secs_f64() / small.as_secs_f64().max(1e-4);
        assert!(
            ratio < 10.0,
            "{unit:?}: 4x input took {ratio:.1}x as long ({small:?} vs {large:?})"
        );
    }
}
