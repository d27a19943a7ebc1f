//! A CommonMark tokenizer with GFM tables and strikethrough, bare-URL
//! linkification and typographic replacements.
//!
//! [`parse`] turns a document into a flat, balanced [`Token`] stream;
//! [`render`] turns that stream into HTML.

pub mod config;
pub mod parser;
pub mod renderer;
pub mod token;
mod utils;

pub use config::Config;
pub use config::ConfigBuilder;
pub use parser::{parse, parse_bytes};
pub use renderer::{RenderOptions, render};
pub use token::{Align, Token, TokenKind};

/// Parse and render a document in one step.
///
/// # Examples
///
/// ```rust
/// use markit::{Config, RenderOptions, render_to_string};
///
/// let html = render_to_string("*hi*", &Config::default(), &RenderOptions::default());
/// assert_eq!(html, "<p><em>hi</em></p>\n");
/// ```
pub fn render_to_string(input: &str, config: &Config, options: &RenderOptions) -> String {
    let tokens = parse(input, config);
    render(&tokens, options)
}
