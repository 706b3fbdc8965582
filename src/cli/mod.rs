//! CLI module
//!
//! Command-line harness around the blog listing controllers.
//!
//! # Commands
//!
//! - `check` - Count posts of the configured site
//! - `index` - Listing in the configured `blog.mode`
//! - `list` - Numbered-pages view of one page
//! - `browse` - "Load more" view
//! - `show` - Single post
//! - `validate` - Validate configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
