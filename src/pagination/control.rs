//! Page navigation for the numbered-pages listing

use serde::Serialize;

/// `ceil(total_count / page_size)`; zero when there are no posts
pub fn total_pages(total_count: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size as u64) as usize
}

/// One numbered page button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub current: bool,
}

/// Previous/next arrows plus one button per page.
///
/// Every page gets a button; there is no ellipsis compaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControl {
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub buttons: Vec<PageButton>,
}

impl PageControl {
    /// Control for `current_page` of `total_pages`, or `None` when there
    /// are no pages to show
    pub fn for_pages(current_page: usize, total_pages: usize) -> Option<Self> {
        if total_pages == 0 {
            return None;
        }

        let buttons = (1..=total_pages)
            .map(|number| PageButton {
                number,
                current: number == current_page,
            })
            .collect();

        Some(Self {
            current_page,
            total_pages,
            previous_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
            buttons,
        })
    }

    /// Page to navigate to when `page` is chosen. `None` when `page` is
    /// the current page or has no button.
    pub fn select(&self, page: usize) -> Option<usize> {
        if page == self.current_page || page < 1 || page > self.total_pages {
            None
        } else {
            Some(page)
        }
    }

    /// Target of the "previous" arrow
    pub fn previous(&self) -> Option<usize> {
        if self.previous_enabled {
            self.select(self.current_page - 1)
        } else {
            None
        }
    }

    /// Target of the "next" arrow
    pub fn next(&self) -> Option<usize> {
        if self.next_enabled {
            self.select(self.current_page + 1)
        } else {
            None
        }
    }
}
