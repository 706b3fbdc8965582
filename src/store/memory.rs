//! In-process content store
//!
//! Serves JSON rows held in memory with the same semantics as the REST
//! store: equality filters, ordering, zero-based inclusive ranges. Every call
//! is recorded, and a single failure can be queued per operation.

use super::types::{ContentStore, Filter, SelectQuery};
use crate::error::{Error, Result, ResultExt};
use crate::types::{JsonValue, Timestamp};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Store operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Count,
    Select,
}

/// A recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Count { table: String, filter: Filter },
    Select { table: String, query: SelectQuery },
}

impl StoreCall {
    /// Operation kind of this call
    pub fn op(&self) -> StoreOp {
        match self {
            StoreCall::Count { .. } => StoreOp::Count,
            StoreCall::Select { .. } => StoreOp::Select,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<String, Vec<JsonValue>>,
    calls: Vec<StoreCall>,
    failures: HashMap<StoreOp, (u16, String)>,
}

/// Content store over in-memory JSON rows
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `rows` in `table`
    pub fn with_rows(table: impl Into<String>, rows: Vec<JsonValue>) -> Self {
        let store = Self::new();
        store.set_rows(table, rows);
        store
    }

    /// Load `table` from a JSON file containing an array of rows
    pub fn from_json_file(table: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        let rows: Vec<JsonValue> = serde_json::from_str(&content).with_context(|| {
            format!("fixture file '{}' is not an array of rows", path.display())
        })?;
        Ok(Self::with_rows(table, rows))
    }

    /// Replace the contents of `table`
    pub fn set_rows(&self, table: impl Into<String>, rows: Vec<JsonValue>) {
        self.lock().tables.insert(table.into(), rows);
    }

    /// Append a row to `table`
    pub fn insert(&self, table: impl Into<String>, row: JsonValue) {
        self.lock().tables.entry(table.into()).or_default().push(row);
    }

    /// Make the next `op` call fail with an HTTP status error
    pub fn fail_next(&self, op: StoreOp, status: u16, body: impl Into<String>) {
        self.lock().failures.insert(op, (status, body.into()));
    }

    /// All calls made so far
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of calls of kind `op`
    pub fn call_count(&self, op: StoreOp) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn take_failure(&mut self, op: StoreOp) -> Result<()> {
        match self.failures.remove(&op) {
            Some((status, body)) => Err(Error::http_status(status, body)),
            None => Ok(()),
        }
    }

    fn matching(&self, table: &str, filter: &Filter) -> Vec<JsonValue> {
        self.tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filter(row, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn count(&self, table: &str, filter: &Filter) -> Result<u64> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Count {
            table: table.to_string(),
            filter: filter.clone(),
        });
        inner.take_failure(StoreOp::Count)?;
        Ok(inner.matching(table, filter).len() as u64)
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<JsonValue>> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Select {
            table: table.to_string(),
            query: query.clone(),
        });
        inner.take_failure(StoreOp::Select)?;

        let mut rows = inner.matching(table, &query.filter);
        if let Some(order) = query.order {
            let column = order.column.as_str();
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(column), b.get(column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        if let Some(range) = query.range {
            rows = rows.into_iter().skip(range.start).take(range.len()).collect();
        }
        Ok(rows)
    }
}

fn matches_filter(row: &JsonValue, filter: &Filter) -> bool {
    filter.conditions().iter().all(|(column, expected)| {
        match row.get(column) {
            Some(JsonValue::String(s)) => s == expected,
            Some(JsonValue::Bool(b)) => b.to_string() == *expected,
            Some(JsonValue::Number(n)) => n.to_string() == *expected,
            Some(JsonValue::Null) | None => expected == "null",
            Some(_) => false,
        }
    })
}

/// Nulls sort lowest; timestamps compare chronologically
fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(JsonValue::String(a)), Some(JsonValue::String(b))) => {
            match (a.parse::<Timestamp>(), b.parse::<Timestamp>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Some(JsonValue::Number(a)), Some(JsonValue::Number(b))) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(JsonValue::Bool(a)), Some(JsonValue::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
