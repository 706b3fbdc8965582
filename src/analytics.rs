//! Analytics event sinks
//!
//! Components report user-facing events (loading more posts, changing page,
//! opening a post) to an [`EventSink`] passed to them explicitly. Dispatch is
//! fire-and-forget: a sink never fails the caller.

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Event category used by the blog components
pub const BLOG_CATEGORY: &str = "blog";

/// A tracked event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub category: String,
    pub label: Option<String>,
    pub value: Option<i64>,
}

/// Receiver of analytics events
pub trait EventSink: Send + Sync {
    /// Record an event
    fn track(&self, event_name: &str, category: &str, label: Option<&str>, value: Option<i64>);
}

/// Shared sink handle
pub type SharedSink = Arc<dyn EventSink>;

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn track(&self, _event_name: &str, _category: &str, _label: Option<&str>, _value: Option<i64>) {}
}

/// Sink that emits events as `tracing` records with target `analytics`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn track(&self, event_name: &str, category: &str, label: Option<&str>, value: Option<i64>) {
        tracing::info!(
            target: "analytics",
            event = event_name,
            category,
            label = label.unwrap_or_default(),
            value = value.unwrap_or_default(),
            "event"
        );
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the events recorded so far
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }
}

impl EventSink for RecordingSink {
    fn track(&self, event_name: &str, category: &str, label: Option<&str>, value: Option<i64>) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(AnalyticsEvent {
                name: event_name.to_string(),
                category: category.to_string(),
                label: label.map(str::to_string),
                value,
            });
    }
}

/// Default sink for components constructed without one
pub fn noop() -> SharedSink {
    Arc::new(NoopSink)
}
