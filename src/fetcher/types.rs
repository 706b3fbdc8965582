//! Page request and result types

use crate::types::{BlogPost, OrderBy, RowRange};
use serde::Serialize;

/// One page worth of rows for a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Site whose posts are fetched
    pub website_id: String,
    /// Listing order
    pub order: OrderBy,
    /// Rows to return
    pub range: RowRange,
}

impl PageRequest {
    /// Rows `[offset, offset + page_size - 1]`
    pub fn from_offset(
        website_id: impl Into<String>,
        order: OrderBy,
        offset: usize,
        page_size: usize,
    ) -> Self {
        Self {
            website_id: website_id.into(),
            order,
            range: RowRange::starting_at(offset, page_size),
        }
    }

    /// Rows of 1-based page `page`: `[(page-1)*page_size, page*page_size - 1]`
    pub fn for_page(
        website_id: impl Into<String>,
        order: OrderBy,
        page: usize,
        page_size: usize,
    ) -> Self {
        let offset = page.saturating_sub(1) * page_size;
        Self::from_offset(website_id, order, offset, page_size)
    }
}

/// Posts of one page plus the site's total post count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub posts: Vec<BlogPost>,
    pub total_count: u64,
}
