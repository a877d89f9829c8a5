//! CLI command definitions using clap.
//!
//! - page: fetch and print one page
//! - crawl: scroll through every page without a terminal UI

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scrollfeed - infinite scroll over randomuser.me in the terminal
#[derive(Parser, Debug)]
#[command(name = "scrollfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Serve generated users locally instead of calling randomuser.me
    #[arg(long, global = true)]
    pub offline: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch a single page and print it
    Page {
        /// 1-based page number
        page: u32,
    },

    /// Raise the visibility signal after every load until the feed runs out
    Crawl {
        /// Stop after this many pages (defaults to feed.max_pages)
        #[arg(short, long)]
        pages: Option<u32>,

        /// Drop visibility signals while a fetch is in flight
        #[arg(short, long)]
        guarded: bool,
    },
}
