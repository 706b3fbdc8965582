//! Post fetcher implementation

use super::types::{PageRequest, PostPage};
use crate::error::{Error, FetchStage, Result};
use crate::store::{ContentStore, Filter, SelectQuery};
use crate::types::{BlogPost, JsonValue, OrderColumn, RowRange};
use std::sync::Arc;
use tracing::debug;

const WEBSITE_ID_COLUMN: &str = "website_id";
const ID_COLUMN: &str = "id";

/// Default table holding blog posts
pub const DEFAULT_TABLE: &str = "blog_posts";

/// Reads blog posts from a content store
#[derive(Clone)]
pub struct PostFetcher {
    store: Arc<dyn ContentStore>,
    table: String,
}

impl PostFetcher {
    /// Fetcher over the default `blog_posts` table
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self::with_table(store, DEFAULT_TABLE)
    }

    /// Fetcher over a custom table
    pub fn with_table(store: Arc<dyn ContentStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Table queried by this fetcher
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Count the site's posts
    pub async fn count_posts(&self, website_id: &str) -> Result<u64> {
        let filter = Filter::new().eq(WEBSITE_ID_COLUMN, website_id);
        self.store
            .count(&self.table, &filter)
            .await
            .map_err(|e| Error::fetch(FetchStage::Count, e))
    }

    /// Fetch one page: count, then select the requested rows.
    ///
    /// Either call failing fails the whole fetch; nothing from a failed
    /// attempt is returned.
    pub async fn fetch_page(&self, request: &PageRequest) -> Result<PostPage> {
        debug!(
            website_id = %request.website_id,
            start = request.range.start,
            end = request.range.end,
            order = %request.order.column,
            ascending = request.order.ascending,
            "fetching page"
        );

        let total_count = self.count_posts(&request.website_id).await?;

        let query = SelectQuery::new(Filter::new().eq(WEBSITE_ID_COLUMN, &request.website_id))
            .order(request.order)
            .range(request.range);
        let rows = self
            .store
            .select(&self.table, &query)
            .await
            .map_err(|e| Error::fetch(FetchStage::Select, e))?;

        let mut posts = decode_posts(rows)?;

        // Store order leaves undated posts at one end; list them by their
        // display date instead.
        if request.order.column == OrderColumn::PublishedAt {
            posts.sort_by(|a, b| {
                let ord = a.display_date().cmp(&b.display_date());
                if request.order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        debug!(returned = posts.len(), total_count, "page fetched");
        Ok(PostPage { posts, total_count })
    }

    /// Fetch a single post of the site by id
    pub async fn fetch_post(&self, website_id: &str, id: &str) -> Result<BlogPost> {
        let query = SelectQuery::new(
            Filter::new()
                .eq(WEBSITE_ID_COLUMN, website_id)
                .eq(ID_COLUMN, id),
        )
        .range(RowRange { start: 0, end: 0 });

        let rows = self
            .store
            .select(&self.table, &query)
            .await
            .map_err(|e| Error::fetch(FetchStage::Select, e))?;

        match decode_posts(rows)?.into_iter().next() {
            Some(post) => Ok(post),
            None => {
                debug!(website_id, id, "post not found");
                Err(Error::not_found(id))
            }
        }
    }
}

impl std::fmt::Debug for PostFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostFetcher")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

fn decode_posts(rows: Vec<JsonValue>) -> Result<Vec<BlogPost>> {
    rows.into_iter()
        .map(serde_json::from_value::<BlogPost>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::fetch(FetchStage::Select, Error::JsonParse(e)))
}
