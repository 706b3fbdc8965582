//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blog listing harness for the agency site
#[derive(Parser, Debug)]
#[command(name = "agency-blog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site configuration file (YAML). Falls back to environment variables.
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Serve posts from a JSON array of rows instead of the remote store
    #[arg(long, global = true)]
    pub fixtures: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count the site's posts
    Check,

    /// Show the listing in the site's configured `blog.mode`
    Index {
        /// 1-based page number (numbered pages mode)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Times to press "load more" (load more mode)
        #[arg(long, default_value = "0")]
        loads: usize,
    },

    /// Show one page of the numbered listing
    List {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Show the "load more" listing
    Browse {
        /// Times to press "load more" after the first page
        #[arg(long, default_value = "0")]
        loads: usize,
    },

    /// Show a single post
    Show {
        /// Post id
        id: String,
    },

    /// Validate configuration and print it with the key masked
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
