//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → REST store → controllers

use agency_blog::analytics::RecordingSink;
use agency_blog::template::TemplateContext;
use agency_blog::{
    DetailState, ListState, ListStatus, ListingOptions, LoadMoreController,
    NumberedPagesController, PostDetail, PostFetcher, RestStore, SiteConfig,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONFIG_YAML: &str = r#"
store:
  url: "{{ env.SUPABASE_URL }}"
  anon_key: "{{ env.SUPABASE_ANON_KEY }}"
blog:
  website_id: "agency"
  per_page: 6
"#;

const TABLE_PATH: &str = "/rest/v1/blog_posts";

fn config_for(server: &MockServer) -> SiteConfig {
    let mut ctx = TemplateContext::new();
    ctx.set_env("SUPABASE_URL", server.uri())
        .set_env("SUPABASE_ANON_KEY", "public-anon");
    SiteConfig::from_yaml(CONFIG_YAML, &ctx).unwrap()
}

fn fetcher_for(config: &SiteConfig) -> PostFetcher {
    let store = RestStore::from_site_config(config).unwrap();
    PostFetcher::with_table(Arc::new(store), &config.store.table)
}

/// Post `n`, newer for larger `n`
fn row(n: u32) -> Value {
    let date = format!("2024-05-{n:02}T12:00:00+00:00");
    json!({
        "id": format!("post-{n}"),
        "website_id": "agency",
        "title": format!("Post {n}"),
        "description": "",
        "content": "body",
        "created_at": date,
        "updated_at": date,
        "published": true,
        "published_at": date,
        "image_url": null,
        "user_id": "author"
    })
}

/// Rows `from` down to `to`, newest first
fn rows(from: u32, to: u32) -> Value {
    Value::Array((to..=from).rev().map(row).collect())
}

async fn mount_count(server: &MockServer, total: u64) {
    Mock::given(method("HEAD"))
        .and(path(TABLE_PATH))
        .and(query_param("website_id", "eq.agency"))
        .and(header("Prefer", "count=exact"))
        .and(header("apikey", "public-anon"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Content-Range", format!("*/{total}")),
        )
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, offset: usize, body: Value) {
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("website_id", "eq.agency"))
        .and(query_param("order", "published_at.desc.nullslast"))
        .and(query_param("offset", offset.to_string()))
        .and(query_param("limit", "6"))
        .and(header("Authorization", "Bearer public-anon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn titles(posts: &[agency_blog::BlogPost]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

// ============================================================================
// Load More
// ============================================================================

#[tokio::test]
async fn test_load_more_until_exhausted() {
    let server = MockServer::start().await;
    mount_count(&server, 8).await;
    mount_page(&server, 0, rows(8, 3)).await;
    mount_page(&server, 6, rows(2, 1)).await;

    let config = config_for(&server);
    let sink = Arc::new(RecordingSink::new());
    let mut list = LoadMoreController::new(
        fetcher_for(&config),
        ListingOptions::from_config(&config.blog).unwrap(),
    )
    .with_events(sink.clone());

    list.initialize().await;
    assert_eq!(list.posts().len(), 6);
    assert_eq!(list.total_count(), 8);
    assert!(list.has_more());

    list.load_more().await;
    assert_eq!(
        titles(list.posts()),
        vec!["Post 8", "Post 7", "Post 6", "Post 5", "Post 4", "Post 3", "Post 2", "Post 1"]
    );
    assert_eq!(*list.state(), ListState::Loaded { has_more: false });

    // Exhausted: no further request is issued
    list.load_more().await;
    assert_eq!(list.posts().len(), 8);
    assert_eq!(sink.names(), vec!["blog_load_more"]);
}

#[tokio::test]
async fn test_count_failure_skips_select() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut list = LoadMoreController::new(
        fetcher_for(&config),
        ListingOptions::from_config(&config.blog).unwrap(),
    );
    list.initialize().await;

    let message = list.error().unwrap();
    assert!(message.contains("(count)"), "unexpected message: {message}");
    assert!(list.posts().is_empty());
    assert!(!list.has_more());
}

#[tokio::test]
async fn test_empty_site() {
    let server = MockServer::start().await;
    mount_count(&server, 0).await;
    mount_page(&server, 0, json!([])).await;

    let config = config_for(&server);
    let mut list = LoadMoreController::new(
        fetcher_for(&config),
        ListingOptions::from_config(&config.blog).unwrap(),
    );
    list.initialize().await;

    let display = list.display();
    assert_eq!(display.status, ListStatus::Empty);
    assert!(!display.has_more);
}

// ============================================================================
// Numbered Pages
// ============================================================================

#[tokio::test]
async fn test_numbered_pages_navigation() {
    let server = MockServer::start().await;
    mount_count(&server, 8).await;
    mount_page(&server, 0, rows(8, 3)).await;
    mount_page(&server, 6, rows(2, 1)).await;

    let config = config_for(&server);
    let sink = Arc::new(RecordingSink::new());
    let mut pages = NumberedPagesController::new(
        fetcher_for(&config),
        ListingOptions::from_config(&config.blog).unwrap(),
    )
    .with_events(sink.clone());

    pages.initialize().await;
    assert_eq!(pages.total_pages(), 2);
    let control = pages.page_control().unwrap();
    assert!(!control.previous_enabled);
    assert!(control.next_enabled);

    pages.next().await;
    assert_eq!(pages.current_page(), 2);
    assert_eq!(titles(pages.posts()), vec!["Post 2", "Post 1"]);
    assert!(!pages.display().has_more);

    // Beyond the last page: ignored without a request
    pages.go_to_page(3).await;
    assert_eq!(pages.current_page(), 2);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "blog_page_change");
    assert_eq!(events[0].value, Some(2));
}

// ============================================================================
// Post Detail
// ============================================================================

#[tokio::test]
async fn test_post_detail_found_and_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("website_id", "eq.agency"))
        .and(query_param("id", "eq.post-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(4)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "eq.missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut detail = PostDetail::new(fetcher_for(&config), &config.blog.website_id);

    detail.load("post-4").await;
    assert_eq!(detail.post().unwrap().title, "Post 4");

    detail.load("missing").await;
    assert_eq!(
        *detail.state(),
        DetailState::NotFound {
            id: "missing".to_string()
        }
    );
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_requires_template_values() {
    let err = SiteConfig::from_yaml(CONFIG_YAML, &TemplateContext::new()).unwrap_err();
    assert!(
        matches!(err, agency_blog::Error::UndefinedVariable { .. }),
        "{err}"
    );
}
