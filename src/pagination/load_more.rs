//! "Load more" listing: each page is appended to the posts already shown

use super::state::{DisplaySurface, DisposeHandle, ListState, ListStatus, ListingOptions};
use crate::analytics::{self, SharedSink, BLOG_CATEGORY};
use crate::fetcher::{PageRequest, PostFetcher, PostPage};
use crate::types::BlogPost;
use tracing::{debug, warn};

/// Listing that grows by one page per [`load_more`](Self::load_more)
pub struct LoadMoreController {
    fetcher: PostFetcher,
    options: ListingOptions,
    posts: Vec<BlogPost>,
    total_count: u64,
    state: ListState,
    events: SharedSink,
    disposed: DisposeHandle,
}

impl LoadMoreController {
    /// Create an idle controller
    pub fn new(fetcher: PostFetcher, options: ListingOptions) -> Self {
        Self {
            fetcher,
            options,
            posts: Vec::new(),
            total_count: 0,
            state: ListState::Idle,
            events: analytics::noop(),
            disposed: DisposeHandle::new(),
        }
    }

    /// Report events to `sink`
    #[must_use]
    pub fn with_events(mut self, sink: SharedSink) -> Self {
        self.events = sink;
        self
    }

    /// Load the first page, replacing anything shown.
    pub async fn initialize(&mut self) {
        let request = PageRequest::from_offset(
            &self.options.website_id,
            self.options.order,
            0,
            self.options.page_size,
        );

        if let Some(page) = self.fetch(request).await {
            self.total_count = page.total_count;
            self.posts = page.posts;
            self.state = ListState::Loaded {
                has_more: self.total_count > self.options.page_size as u64,
            };
        }
    }

    /// Append the next page. Does nothing when every post is already shown.
    ///
    /// `&mut self` keeps fetches from overlapping, so a `Loading` state left
    /// behind by a dropped fetch is not treated as one in flight.
    pub async fn load_more(&mut self) {
        if !self.has_more() {
            debug!(state = ?self.state, "load_more skipped");
            return;
        }

        let request = PageRequest::from_offset(
            &self.options.website_id,
            self.options.order,
            self.posts.len(),
            self.options.page_size,
        );

        if let Some(page) = self.fetch(request).await {
            self.total_count = page.total_count;
            self.posts.extend(page.posts);
            self.state = ListState::Loaded {
                has_more: self.total_count > self.posts.len() as u64,
            };
            self.events.track(
                "blog_load_more",
                BLOG_CATEGORY,
                Some(self.options.website_id.as_str()),
                Some(self.posts.len() as i64),
            );
        }
    }

    /// Run one fetch. `None` when it failed (state updated) or when the
    /// controller was disposed meanwhile (state untouched).
    async fn fetch(&mut self, request: PageRequest) -> Option<PostPage> {
        if self.disposed.is_disposed() {
            return None;
        }

        self.state = ListState::Loading;
        let result = self.fetcher.fetch_page(&request).await;

        if self.disposed.is_disposed() {
            debug!("controller disposed, dropping response");
            return None;
        }

        match result {
            Ok(page) => Some(page),
            Err(e) => {
                warn!(website_id = %self.options.website_id, error = %e, "failed to load posts");
                self.state = ListState::failed(&e);
                None
            }
        }
    }

    /// Posts shown, in fetch-then-append order
    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Total posts of the site as of the last successful fetch
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Current state
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Message of the last failure
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Whether [`load_more`](Self::load_more) would fetch. After a failed
    /// or abandoned fetch this reflects the last successful load.
    pub fn has_more(&self) -> bool {
        match &self.state {
            ListState::Loaded { has_more } => *has_more,
            ListState::Failed { .. } | ListState::Loading => {
                self.total_count > self.posts.len() as u64
            }
            ListState::Idle => false,
        }
    }

    /// Handle that tears this controller down
    pub fn dispose_handle(&self) -> DisposeHandle {
        self.disposed.clone()
    }

    /// Options this controller lists with
    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    /// View for the list renderer
    pub fn display(&self) -> DisplaySurface<'_> {
        DisplaySurface {
            posts: &self.posts,
            status: ListStatus::from_state(&self.state, &self.posts),
            total_count: self.total_count,
            has_more: self.has_more(),
            page_control: None,
        }
    }
}

impl std::fmt::Debug for LoadMoreController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadMoreController")
            .field("options", &self.options)
            .field("posts", &self.posts.len())
            .field("total_count", &self.total_count)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
