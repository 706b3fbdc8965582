//! PostgREST-backed content store
//!
//! Count queries use `HEAD` with `Prefer: count=exact` and read the total
//! from the `Content-Range` response header. Select queries use `GET` with
//! `order`, `offset` and `limit` parameters. Nulls sort lowest in either
//! direction.

use super::types::{ContentStore, Filter, SelectQuery};
use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig};
use crate::types::{JsonValue, OrderBy};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`RestStore`]
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL
    pub url: String,
    /// Path of the REST interface below `url`
    pub rest_path: String,
    /// Public API key, sent as `apikey` and as bearer token
    pub anon_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Optional client-side rate limit
    pub requests_per_second: Option<u32>,
    /// User agent override
    pub user_agent: Option<String>,
}

impl RestStoreConfig {
    /// Settings with defaults for everything but the URL and key
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rest_path: "rest/v1".to_string(),
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(30),
            requests_per_second: None,
            user_agent: None,
        }
    }
}

impl From<&SiteConfig> for RestStoreConfig {
    fn from(config: &SiteConfig) -> Self {
        Self {
            url: config.store.url.clone(),
            rest_path: config.store.rest_path.clone(),
            anon_key: config.store.anon_key.clone(),
            timeout: config.http.timeout(),
            requests_per_second: config.http.requests_per_second,
            user_agent: config.http.user_agent.clone(),
        }
    }
}

/// Content store reached over the hosted backend's REST interface
#[derive(Debug)]
pub struct RestStore {
    http: HttpClient,
}

impl RestStore {
    /// Create a store client
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        let base = url::Url::parse(&config.url)?;
        let base_url = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            config.rest_path.trim_matches('/')
        );

        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(config.timeout)
            .header("apikey", config.anon_key.as_str())
            .header("Authorization", format!("Bearer {}", config.anon_key));
        if let Some(rps) = config.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        if let Some(agent) = config.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(Self {
            http: HttpClient::with_config(builder.build())?,
        })
    }

    /// Create a store client from site configuration
    pub fn from_site_config(config: &SiteConfig) -> Result<Self> {
        Self::new(RestStoreConfig::from(config))
    }
}

/// `select=*` plus one `column=eq.value` pair per condition
fn filter_params(filter: &Filter) -> RequestConfig {
    filter
        .conditions()
        .iter()
        .fold(RequestConfig::new().query("select", "*"), |req, (column, value)| {
            req.query(column.as_str(), format!("eq.{value}"))
        })
}

/// `column.direction.nulls…` with nulls lowest, matching [`MemoryStore`]
///
/// [`MemoryStore`]: super::MemoryStore
pub(crate) fn order_param(order: OrderBy) -> String {
    if order.ascending {
        format!("{}.asc.nullsfirst", order.column)
    } else {
        format!("{}.desc.nullslast", order.column)
    }
}

/// Parse the total from a `Content-Range` value such as `0-5/42` or `*/0`
pub(crate) fn parse_content_range_total(value: &str) -> Result<u64> {
    let total = value
        .rsplit_once('/')
        .map(|(_, total)| total.trim())
        .ok_or_else(|| Error::query(format!("malformed Content-Range '{value}'")))?;

    total
        .parse()
        .map_err(|_| Error::query(format!("Content-Range '{value}' carries no exact count")))
}

#[async_trait]
impl ContentStore for RestStore {
    async fn count(&self, table: &str, filter: &Filter) -> Result<u64> {
        let request = filter_params(filter).header("Prefer", "count=exact");
        debug!(table, ?filter, "count query");

        let response = self.http.head_with_config(table, request).await?;
        let content_range = response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .ok_or_else(|| Error::query("count response has no Content-Range header"))?
            .to_str()
            .map_err(|e| Error::query(format!("unreadable Content-Range: {e}")))?;

        parse_content_range_total(content_range)
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<JsonValue>> {
        let mut request = filter_params(&query.filter);
        if let Some(order) = query.order {
            request = request.query("order", order_param(order));
        }
        if let Some(range) = query.range {
            request = request
                .query("offset", range.start.to_string())
                .query("limit", range.len().to_string());
        }
        debug!(table, ?query, "select query");

        let rows: JsonValue = self.http.get_json_with_config(table, request).await?;
        match rows {
            JsonValue::Array(rows) => Ok(rows),
            other => Err(Error::query(format!(
                "expected an array of rows, got {}",
                type_name(&other)
            ))),
        }
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
