//! Pagination
//!
//! Page bookkeeping for server-paginated lists. Pages are 1-based.

use serde::{Deserialize, Serialize};

/// Page sizes offered by list screens
pub const PAGE_SIZES: &[u32] = &[5, 10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Pagination {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total_pages: 0,
            total_items: 0,
        }
    }

    /// A page can be requested only if it exists in the last fetched result
    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.can_go_to(self.page + 1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.can_go_to(self.page - 1)
    }

    /// 1-based index of the first record on the current page (0 when empty)
    pub fn first_index(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.limit) + 1
        }
    }

    /// 1-based index of the last record on the current page
    pub fn last_index(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total_items)
    }

    /// Record the metadata of a completed fetch for `page`
    pub fn apply(&mut self, page: u32, limit: u32, total_pages: u32, total_items: u64) {
        self.page = page;
        self.limit = limit.max(1);
        self.total_pages = total_pages;
        self.total_items = total_items;
    }
}

/// One page of records as returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    #[serde(default = "Vec::new")]
    pub data: Vec<R>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub message: Option<String>,
}

impl<R> Page<R> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total_pages: 0,
            total_documents: 0,
            message: None,
        }
    }
}
