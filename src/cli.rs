use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "markit")]
#[command(author, version)]
#[command(about = "Tokenize and render CommonMark documents")]
#[command(
    long_about = "markit parses CommonMark (plus pipe tables, strikethrough, bare-URL \
    linkification and typographic replacements) into a flat token stream, and renders \
    that stream as HTML."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file to HTML
    markit render README.md

    # Render from stdin
    echo '# Heading' | markit render

    # Show the token stream as JSON
    markit parse --json README.md

CONFIGURATION:

markit looks for configuration files in this order:
  1. Explicit --config path
  2. markit.toml or .markit.toml in current/parent directories
  3. ~/.config/markit/config.toml (XDG)
  4. Built-in defaults

Example .markit.toml:

    html = true
    typographer = false
    quotes = \"«»‹›\"
    max-nesting = 20")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, env = "MARKIT_CONFIG")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, markit will \
        search for .markit.toml or markit.toml in the input's directory and its parents, \
        then fall back to ~/.config/markit/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the token stream of a document
    #[command(after_help = "\
EXAMPLES:

    # Debug listing of the tokens
    markit parse document.md

    # JSON, one object per token with a \"type\" field
    markit parse --json document.md")]
    Parse {
        /// Input file (stdin if not provided)
        file: Option<PathBuf>,

        /// Print tokens as JSON instead of the debug listing
        #[arg(long)]
        json: bool,
    },
    /// Render a document as HTML
    Render {
        /// Input file (stdin if not provided)
        file: Option<PathBuf>,

        /// Close void elements XHTML-style (`<br />`)
        #[arg(long)]
        xhtml: bool,

        /// Turn soft line breaks into `<br>`
        #[arg(long)]
        breaks: bool,

        /// Add rel="nofollow" to links
        #[arg(long)]
        nofollow: bool,

        /// Class prefix for fenced code languages
        #[arg(long, default_value = "language-")]
        lang_prefix: String,
    },
}
