//! Numbered-pages listing: each fetch replaces the posts shown

use super::control::{total_pages, PageControl};
use super::state::{DisplaySurface, DisposeHandle, ListState, ListStatus, ListingOptions};
use crate::analytics::{self, SharedSink, BLOG_CATEGORY};
use crate::fetcher::{PageRequest, PostFetcher};
use crate::types::BlogPost;
use tracing::{debug, warn};

/// Listing that shows one 1-based page at a time
pub struct NumberedPagesController {
    fetcher: PostFetcher,
    options: ListingOptions,
    current_page: usize,
    posts: Vec<BlogPost>,
    /// `None` until the first successful fetch
    total_count: Option<u64>,
    state: ListState,
    events: SharedSink,
    disposed: DisposeHandle,
}

impl NumberedPagesController {
    /// Create an idle controller positioned on page 1
    pub fn new(fetcher: PostFetcher, options: ListingOptions) -> Self {
        Self {
            fetcher,
            options,
            current_page: 1,
            posts: Vec::new(),
            total_count: None,
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

    /// Load page 1
    pub async fn initialize(&mut self) {
        self.load(1).await;
    }

    /// Fetch page `page` and show it in place of the current posts.
    ///
    /// Pages outside `1..=total_pages` are ignored once the total is known.
    /// Requesting the page already shown fetches it again. A fetch that was
    /// dropped before completing does not block the next one.
    pub async fn go_to_page(&mut self, page: usize) {
        let in_range = match self.total_count {
            Some(total) => (1..=total_pages(total, self.options.page_size)).contains(&page),
            None => page >= 1,
        };
        if !in_range {
            debug!(page, total_pages = self.total_pages(), "page out of range");
            return;
        }

        if self.load(page).await {
            self.events.track(
                "blog_page_change",
                BLOG_CATEGORY,
                Some(self.options.website_id.as_str()),
                Some(page as i64),
            );
        }
    }

    /// Follow a page button. Choosing the current page does nothing.
    pub async fn navigate(&mut self, page: usize) {
        let target = self.page_control().and_then(|control| control.select(page));
        match target {
            Some(page) => self.go_to_page(page).await,
            None => debug!(page, current = self.current_page, "navigation ignored"),
        }
    }

    /// Follow the "next" arrow
    pub async fn next(&mut self) {
        if let Some(page) = self.page_control().and_then(|c| c.next()) {
            self.go_to_page(page).await;
        }
    }

    /// Follow the "previous" arrow
    pub async fn previous(&mut self) {
        if let Some(page) = self.page_control().and_then(|c| c.previous()) {
            self.go_to_page(page).await;
        }
    }

    /// Fetch `page`; true on success
    async fn load(&mut self, page: usize) -> bool {
        if self.disposed.is_disposed() {
            return false;
        }

        let request = PageRequest::for_page(
            &self.options.website_id,
            self.options.order,
            page,
            self.options.page_size,
        );

        self.state = ListState::Loading;
        let result = self.fetcher.fetch_page(&request).await;

        if self.disposed.is_disposed() {
            debug!(page, "controller disposed, dropping response");
            return false;
        }

        match result {
            Ok(fetched) => {
                self.current_page = page;
                self.posts = fetched.posts;
                self.total_count = Some(fetched.total_count);
                self.state = ListState::Loaded {
                    has_more: page < self.total_pages(),
                };
                true
            }
            Err(e) => {
                warn!(page, website_id = %self.options.website_id, error = %e, "failed to load page");
                self.state = ListState::failed(&e);
                false
            }
        }
    }

    /// 1-based page currently shown
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Posts of the current page
    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Total posts as of the last successful fetch
    pub fn total_count(&self) -> u64 {
        self.total_count.unwrap_or(0)
    }

    /// `ceil(total_count / page_size)`
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count(), self.options.page_size)
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

    /// Navigation control, `None` when there are no pages
    pub fn page_control(&self) -> Option<PageControl> {
        PageControl::for_pages(self.current_page, self.total_pages())
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
            total_count: self.total_count(),
            has_more: self.current_page < self.total_pages(),
            page_control: self.page_control(),
        }
    }
}

impl std::fmt::Debug for NumberedPagesController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberedPagesController")
            .field("options", &self.options)
            .field("current_page", &self.current_page)
            .field("posts", &self.posts.len())
            .field("total_count", &self.total_count)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
