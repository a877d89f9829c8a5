//! CLI module for scrollfeed - command-line interface and subcommands.
//!
//! With no subcommand the terminal UI starts; `page` and `crawl` run headless.

pub mod commands;

pub use commands::{Cli, Commands};
