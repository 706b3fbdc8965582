//! Pagination module
//!
//! Supports: Load More (append), Numbered Pages (replace)
//!
//! # Overview
//!
//! A controller owns the list shown to the reader. It asks the
//! [`PostFetcher`](crate::fetcher::PostFetcher) for row ranges, folds the
//! results into its list, and exposes a [`DisplaySurface`] for rendering.
//!
//! Both controllers move through the same states:
//!
//! ```text
//! Idle ──▶ Loading ──▶ Loaded { has_more }
//!             │
//!             └──────▶ Failed { message } ──(next call)──▶ Loading
//! ```
//!
//! Errors are stored, never retried. Only one fetch runs per controller at
//! a time; a torn-down controller ignores responses that arrive late.

mod control;
mod load_more;
mod numbered;
mod state;

pub use control::{total_pages, PageButton, PageControl};
pub use load_more::LoadMoreController;
pub use numbered::NumberedPagesController;
pub use state::{DisplaySurface, DisposeHandle, ListState, ListStatus, ListingOptions};
