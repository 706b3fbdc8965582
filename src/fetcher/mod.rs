//! Post fetcher module
//!
//! Turns page requests into store queries. A page fetch always issues two
//! independent operations against the store:
//!
//! 1. a count of the site's posts, for the total
//! 2. a select of the site's posts, ordered and limited to the page's rows
//!
//! The two calls are not transactional. If posts are added or removed
//! between them, the total can disagree with the rows by that delta; the
//! fetcher does not try to reconcile the two.

mod fetch;
mod types;

pub use fetch::{PostFetcher, DEFAULT_TABLE};
pub use types::{PageRequest, PostPage};
