//! CLI integration tests for markit.
//!
//! These tests execute the compiled binary and verify subcommand behavior,
//! stdin/stdout handling, config discovery and exit codes.

mod common;
mod config;
mod parse;
mod render;
