//! Common types used throughout the crate
//!
//! This module contains the blog post record, query ordering and range
//! types, and a few shared aliases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Timestamp type used by the content store
pub type Timestamp = DateTime<Utc>;

// ============================================================================
// Blog Post
// ============================================================================

/// A blog post row as stored in the remote content store.
///
/// The application only ever holds read-only copies. `published` and
/// `published_at` are independent: a draft may still carry a stale
/// `published_at` from an earlier publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub website_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub user_id: String,
}

impl BlogPost {
    /// Date shown next to the post: `published_at`, else `updated_at`
    pub fn display_date(&self) -> Timestamp {
        self.published_at.unwrap_or(self.updated_at)
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Columns a post listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderColumn {
    #[default]
    PublishedAt,
    CreatedAt,
    UpdatedAt,
    Title,
}

impl OrderColumn {
    /// Column name in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderColumn::PublishedAt => "published_at",
            OrderColumn::CreatedAt => "created_at",
            OrderColumn::UpdatedAt => "updated_at",
            OrderColumn::Title => "title",
        }
    }
}

impl std::fmt::Display for OrderColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: OrderColumn,
    #[serde(default)]
    pub ascending: bool,
}

impl OrderBy {
    /// Ascending on `column`
    pub fn asc(column: OrderColumn) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    /// Descending on `column`
    pub fn desc(column: OrderColumn) -> Self {
        Self {
            column,
            ascending: false,
        }
    }
}

impl Default for OrderBy {
    /// Newest first
    fn default() -> Self {
        Self::desc(OrderColumn::PublishedAt)
    }
}

// ============================================================================
// Row Range
// ============================================================================

/// Zero-based inclusive row interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Range of `page_size` rows beginning at `start`
    ///
    /// `page_size` must be non-zero.
    pub fn starting_at(start: usize, page_size: usize) -> Self {
        debug_assert!(page_size > 0);
        Self {
            start,
            end: start + page_size - 1,
        }
    }

    /// Number of rows covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A range always covers at least one row
    pub fn is_empty(&self) -> bool {
        false
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Default CLI level, `Debug` when verbose
    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
