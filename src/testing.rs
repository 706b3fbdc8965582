//! Shared fixtures for unit tests

use crate::fetcher::{PostFetcher, DEFAULT_TABLE};
use crate::store::MemoryStore;
use crate::types::JsonValue;
use serde_json::json;
use std::sync::Arc;

pub const SITE: &str = "site-1";

/// Row for post `n` of `website_id`, published `n` days into 2024
pub fn post_row(n: usize, website_id: &str) -> JsonValue {
    let day = "2024-01-01T00:00:00Z"
        .parse::<chrono::DateTime<chrono::Utc>>()
        .unwrap()
        + chrono::Duration::days(n as i64);
    json!({
        "id": format!("post-{n}"),
        "website_id": website_id,
        "title": format!("Post {n}"),
        "description": format!("Description {n}"),
        "content": format!("# Post {n}"),
        "created_at": day.to_rfc3339(),
        "updated_at": day.to_rfc3339(),
        "published": true,
        "user_id": "author-1",
        "published_at": day.to_rfc3339(),
        "image_url": null
    })
}

/// Store holding `count` posts of [`SITE`] plus two posts of another site
pub fn seeded_store(count: usize) -> Arc<MemoryStore> {
    let mut rows: Vec<JsonValue> = (1..=count).map(|n| post_row(n, SITE)).collect();
    rows.push(post_row(900, "other-site"));
    rows.push(post_row(901, "other-site"));
    Arc::new(MemoryStore::with_rows(DEFAULT_TABLE, rows))
}

/// Fetcher over `store`
pub fn fetcher(store: &Arc<MemoryStore>) -> PostFetcher {
    PostFetcher::new(store.clone())
}
