//! Controller state types

use super::control::PageControl;
use crate::config::BlogConfig;
use crate::error::{Error, Result};
use crate::types::{BlogPost, OrderBy};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What a listing shows and how it is paged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    pub website_id: String,
    pub page_size: usize,
    pub order: OrderBy,
}

impl ListingOptions {
    /// Newest-first listing of `website_id`, `page_size` posts at a time
    pub fn new(website_id: impl Into<String>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        Ok(Self {
            website_id: website_id.into(),
            page_size,
            order: OrderBy::default(),
        })
    }

    /// Set the listing order
    #[must_use]
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    /// Options from the blog section of the site config
    pub fn from_config(config: &BlogConfig) -> Result<Self> {
        Ok(Self::new(&config.website_id, config.per_page)?.order(config.order_by))
    }
}

/// Fetch lifecycle of a controller
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded { has_more: bool },
    /// The last fetch failed
    Failed { message: String },
}

impl ListState {
    /// Failed state carrying the error's message
    pub fn failed(error: &Error) -> Self {
        Self::Failed {
            message: error.to_string(),
        }
    }

    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error message of a failed fetch
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// What the list area should show. Exactly one applies at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ListStatus {
    /// Nothing requested yet
    Idle,
    /// Spinner
    Loading,
    /// Inline error message
    Error(String),
    /// "No blog posts found."
    Empty,
    /// Posts to render
    Ready,
}

impl ListStatus {
    /// Derive the display status from the controller state
    pub fn from_state(state: &ListState, posts: &[BlogPost]) -> Self {
        match state {
            ListState::Idle => Self::Idle,
            ListState::Loading => Self::Loading,
            ListState::Failed { message } => Self::Error(message.clone()),
            ListState::Loaded { .. } if posts.is_empty() => Self::Empty,
            ListState::Loaded { .. } => Self::Ready,
        }
    }
}

/// Everything the list renderer reads from a controller
#[derive(Debug, Clone, Serialize)]
pub struct DisplaySurface<'a> {
    pub posts: &'a [BlogPost],
    pub status: ListStatus,
    pub total_count: u64,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_control: Option<PageControl>,
}

/// Marks a controller as torn down
///
/// Once disposed, responses that arrive for in-flight fetches are dropped
/// and further calls do nothing.
#[derive(Debug, Clone, Default)]
pub struct DisposeHandle {
    disposed: Arc<AtomicBool>,
}

impl DisposeHandle {
    /// Create a live handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear the owning controller down
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    /// Check if the owning controller was torn down
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
