//! Single post view
//!
//! Loads one post by id. A missing post is its own state, distinct from a
//! failed fetch, so the reader sees "post not found" rather than an error.

use crate::analytics::{self, SharedSink, BLOG_CATEGORY};
use crate::error::Error;
use crate::fetcher::PostFetcher;
use crate::types::BlogPost;
use serde::Serialize;
use tracing::{debug, warn};

/// Lifecycle of a single post view
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Loaded { post: Box<BlogPost> },
    NotFound { id: String },
    Failed { message: String },
}

/// State holder for the post page
pub struct PostDetail {
    fetcher: PostFetcher,
    website_id: String,
    state: DetailState,
    events: SharedSink,
}

impl PostDetail {
    /// Create an idle view for posts of `website_id`
    pub fn new(fetcher: PostFetcher, website_id: impl Into<String>) -> Self {
        Self {
            fetcher,
            website_id: website_id.into(),
            state: DetailState::Idle,
            events: analytics::noop(),
        }
    }

    /// Report events to `sink`
    #[must_use]
    pub fn with_events(mut self, sink: SharedSink) -> Self {
        self.events = sink;
        self
    }

    /// Load post `id`
    pub async fn load(&mut self, id: &str) {
        self.state = DetailState::Loading;

        self.state = match self.fetcher.fetch_post(&self.website_id, id).await {
            Ok(post) => {
                self.events
                    .track("blog_post_view", BLOG_CATEGORY, Some(post.id.as_str()), None);
                DetailState::Loaded {
                    post: Box::new(post),
                }
            }
            Err(Error::NotFound { id }) => {
                debug!(%id, "post not found");
                DetailState::NotFound { id }
            }
            Err(e) => {
                warn!(id, error = %e, "failed to load post");
                DetailState::Failed {
                    message: e.to_string(),
                }
            }
        };
    }

    /// Current state
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Loaded post, if any
    pub fn post(&self) -> Option<&BlogPost> {
        match &self.state {
            DetailState::Loaded { post } => Some(post),
            _ => None,
        }
    }
}

impl std::fmt::Debug for PostDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostDetail")
            .field("website_id", &self.website_id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
