// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Agency Blog
//!
//! Data core of the agency website's blog: paginated post listings backed
//! by a hosted Postgres REST interface.
//!
//! ## Features
//!
//! - **Post Fetcher**: exact count plus ranged select per page, filtered by website
//! - **Load More**: listing that appends one page per request
//! - **Numbered Pages**: listing that replaces the posts shown, with a page control
//! - **Post Detail**: single post lookup with a distinct "not found" state
//! - **Analytics**: injected event sink for page changes and post views
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agency_blog::{ListingOptions, LoadMoreController, PostFetcher, RestStore, SiteConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> agency_blog::Result<()> {
//!     let config = SiteConfig::from_env()?;
//!     let store = Arc::new(RestStore::from_site_config(&config)?);
//!     let fetcher = PostFetcher::with_table(store, &config.store.table);
//!
//!     let mut list = LoadMoreController::new(fetcher, ListingOptions::from_config(&config.blog)?);
//!     list.initialize().await;
//!     while list.has_more() {
//!         list.load_more().await;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  LoadMoreController   NumberedPagesController   PostDetail   │
//! │        ListState / ListStatus / PageControl / EventSink      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//!                  PostFetcher (count, then select)
//!                                │
//!                  ContentStore ─┴─ RestStore  │  MemoryStore
//!                                │
//!                  HttpClient (timeout, rate limit)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Template interpolation
pub mod template;

/// Site configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// Content store backends
pub mod store;

/// Post fetching
pub mod fetcher;

/// Listing controllers
pub mod pagination;

/// Single post view
pub mod detail;

/// Analytics event sinks
pub mod analytics;

/// Text rendering
pub mod present;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use analytics::{EventSink, SharedSink};
pub use config::SiteConfig;
pub use detail::{DetailState, PostDetail};
pub use fetcher::{PageRequest, PostFetcher, PostPage};
pub use pagination::{
    ListState, ListStatus, ListingOptions, LoadMoreController, NumberedPagesController,
    PageControl,
};
pub use store::{ContentStore, MemoryStore, RestStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
