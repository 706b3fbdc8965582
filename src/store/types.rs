//! Store query types and the store trait

use crate::error::Result;
use crate::types::{JsonValue, OrderBy, RowRange};
use async_trait::async_trait;

/// Conjunction of equality conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    /// Empty filter (matches every row)
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column = value`
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    /// Conditions in insertion order
    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Value required for `column`, if constrained
    pub fn value_for(&self, column: &str) -> Option<&str> {
        self.conditions
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Check if the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// A row-returning query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    /// Row filter
    pub filter: Filter,
    /// Optional ordering
    pub order: Option<OrderBy>,
    /// Optional zero-based inclusive row range
    pub range: Option<RowRange>,
}

impl SelectQuery {
    /// Select rows matching `filter`
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    /// Set ordering
    #[must_use]
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Limit to `range`
    #[must_use]
    pub fn range(mut self, range: RowRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Read access to a hosted table store
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Number of rows in `table` matching `filter`
    async fn count(&self, table: &str, filter: &Filter) -> Result<u64>;

    /// Rows in `table` matching the query
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<JsonValue>>;
}
