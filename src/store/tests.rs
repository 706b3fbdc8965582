//! Tests for the store module

use super::rest::{order_param, parse_content_range_total};
use super::*;
use crate::error::Error;
use crate::types::{OrderBy, OrderColumn, RowRange};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rest_store(server: &MockServer) -> RestStore {
    RestStore::new(RestStoreConfig::new(server.uri(), "anon-key")).unwrap()
}

fn rows() -> Vec<serde_json::Value> {
    vec![
        json!({"id": "a", "website_id": "s1", "published_at": "2024-01-01T00:00:00Z"}),
        json!({"id": "b", "website_id": "s1", "published_at": null}),
        json!({"id": "c", "website_id": "s2", "published_at": "2024-03-01T00:00:00Z"}),
        json!({"id": "d", "website_id": "s1", "published_at": "2024-02-01T00:00:00+00:00"}),
    ]
}

fn ids(rows: &[serde_json::Value]) -> Vec<&str> {
    rows.iter().map(|r| r["id"].as_str().unwrap()).collect()
}

// ============================================================================
// Query Types
// ============================================================================

#[test]
fn test_filter_builder() {
    let filter = Filter::new().eq("website_id", "s1").eq("id", "x");
    assert!(!filter.is_empty());
    assert_eq!(filter.value_for("id"), Some("x"));
    assert_eq!(filter.value_for("title"), None);
    assert_eq!(filter.conditions().len(), 2);
}

#[test]
fn test_select_query_builder() {
    let query = SelectQuery::new(Filter::new().eq("website_id", "s1"))
        .order(OrderBy::default())
        .range(RowRange::starting_at(0, 6));
    assert_eq!(query.order, Some(OrderBy::desc(OrderColumn::PublishedAt)));
    assert_eq!(query.range, Some(RowRange { start: 0, end: 5 }));
}

#[test_case(OrderBy::desc(OrderColumn::PublishedAt), "published_at.desc.nullslast" ; "desc puts undated last")]
#[test_case(OrderBy::asc(OrderColumn::PublishedAt), "published_at.asc.nullsfirst" ; "asc puts undated first")]
#[test_case(OrderBy::desc(OrderColumn::UpdatedAt), "updated_at.desc.nullslast" ; "other column")]
fn test_order_param(order: OrderBy, expected: &str) {
    assert_eq!(order_param(order), expected);
}

#[test_case("0-5/42", 42 ; "partial range")]
#[test_case("*/0", 0 ; "empty table")]
#[test_case("*/7", 7 ; "head request")]
fn test_parse_content_range_total(value: &str, expected: u64) {
    assert_eq!(parse_content_range_total(value).unwrap(), expected);
}

#[test_case("0-5" ; "no total")]
#[test_case("0-5/*" ; "unknown total")]
fn test_parse_content_range_total_rejects(value: &str) {
    assert!(matches!(
        parse_content_range_total(value),
        Err(Error::Query { .. })
    ));
}

// ============================================================================
// RestStore
// ============================================================================

#[tokio::test]
async fn test_rest_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("select", "*"))
        .and(query_param("website_id", "eq.s1"))
        .and(header("Prefer", "count=exact"))
        .and(header("apikey", "anon-key"))
        .and(header("Authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "*/10"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = rest_store(&mock_server);
    let total = store
        .count("blog_posts", &Filter::new().eq("website_id", "s1"))
        .await
        .unwrap();
    assert_eq!(total, 10);
}

#[tokio::test]
async fn test_rest_count_without_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let store = rest_store(&mock_server);
    let err = store
        .count("blog_posts", &Filter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Query { .. }));
}

#[tokio::test]
async fn test_rest_select_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("select", "*"))
        .and(query_param("website_id", "eq.s1"))
        .and(query_param("order", "published_at.desc.nullslast"))
        .and(query_param("offset", "6"))
        .and(query_param("limit", "6"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}, {"id": "b"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = rest_store(&mock_server);
    let query = SelectQuery::new(Filter::new().eq("website_id", "s1"))
        .order(OrderBy::desc(OrderColumn::PublishedAt))
        .range(RowRange::starting_at(6, 6));
    let rows = store.select("blog_posts", &query).await.unwrap();
    assert_eq!(ids(&rows), vec!["a", "b"]);
}

#[tokio::test]
async fn test_rest_select_ascending_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("order", "title.asc.nullsfirst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = rest_store(&mock_server);
    let query = SelectQuery::new(Filter::new()).order(OrderBy::asc(OrderColumn::Title));
    assert!(store.select("blog_posts", &query).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rest_select_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"message":"column blog_posts.nope does not exist"}"#),
        )
        .mount(&mock_server)
        .await;

    let store = rest_store(&mock_server);
    let err = store
        .select("blog_posts", &SelectQuery::default())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("does not exist"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rest_select_non_array_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a"})))
        .mount(&mock_server)
        .await;

    let store = rest_store(&mock_server);
    let err = store
        .select("blog_posts", &SelectQuery::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("got object"));
}

#[test]
fn test_rest_store_rejects_bad_url() {
    let err = RestStore::new(RestStoreConfig::new("not a url", "k")).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// MemoryStore
// ============================================================================

#[tokio::test]
async fn test_memory_count_filters() {
    let store = MemoryStore::with_rows("posts", rows());
    let filter = Filter::new().eq("website_id", "s1");
    assert_eq!(store.count("posts", &filter).await.unwrap(), 3);
    assert_eq!(store.count("other", &filter).await.unwrap(), 0);
}

#[tokio::test]
async fn test_memory_select_orders_and_ranges() {
    let store = MemoryStore::with_rows("posts", rows());
    let filter = Filter::new().eq("website_id", "s1");

    let desc = SelectQuery::new(filter.clone()).order(OrderBy::desc(OrderColumn::PublishedAt));
    assert_eq!(ids(&store.select("posts", &desc).await.unwrap()), vec!["d", "a", "b"]);

    let asc = SelectQuery::new(filter.clone()).order(OrderBy::asc(OrderColumn::PublishedAt));
    assert_eq!(ids(&store.select("posts", &asc).await.unwrap()), vec!["b", "a", "d"]);

    let ranged = desc.clone().range(RowRange { start: 1, end: 5 });
    assert_eq!(ids(&store.select("posts", &ranged).await.unwrap()), vec!["a", "b"]);

    let past_end = desc.range(RowRange { start: 3, end: 5 });
    assert!(store.select("posts", &past_end).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_filter_on_bool_and_null() {
    let store = MemoryStore::with_rows(
        "posts",
        vec![
            json!({"id": "a", "published": true, "image_url": null}),
            json!({"id": "b", "published": false, "image_url": "x.png"}),
        ],
    );

    let rows = store
        .select("posts", &SelectQuery::new(Filter::new().eq("published", "true")))
        .await
        .unwrap();
    assert_eq!(ids(&rows), vec!["a"]);

    let rows = store
        .select("posts", &SelectQuery::new(Filter::new().eq("image_url", "null")))
        .await
        .unwrap();
    assert_eq!(ids(&rows), vec!["a"]);
}

#[tokio::test]
async fn test_memory_records_calls_and_injects_failure() {
    let store = MemoryStore::with_rows("posts", rows());
    store.fail_next(StoreOp::Select, 503, "unavailable");

    let filter = Filter::new().eq("website_id", "s1");
    store.count("posts", &filter).await.unwrap();
    let err = store
        .select("posts", &SelectQuery::new(filter.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503: unavailable");

    // One-shot
    assert_eq!(
        store
            .select("posts", &SelectQuery::new(filter.clone()))
            .await
            .unwrap()
            .len(),
        3
    );

    assert_eq!(store.call_count(StoreOp::Count), 1);
    assert_eq!(store.call_count(StoreOp::Select), 2);
    assert_eq!(
        store.calls()[0],
        StoreCall::Count {
            table: "posts".to_string(),
            filter,
        }
    );
}

#[tokio::test]
async fn test_memory_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("posts.json");
    std::fs::write(&file, serde_json::to_string(&rows()).unwrap()).unwrap();

    let store = MemoryStore::from_json_file("posts", &file).unwrap();
    assert_eq!(store.count("posts", &Filter::new()).await.unwrap(), 4);

    let missing = MemoryStore::from_json_file("posts", dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, Error::FileNotFound { .. }));
}
