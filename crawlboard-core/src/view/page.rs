//! Fixed-size pagination

use serde::{Deserialize, Serialize};

/// Rows per dashboard page
pub const PAGE_SIZE: usize = 10;

/// One page of a derived view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown, after clamping
    pub page: usize,
    /// `ceil(total_items / page_size)`; zero for an empty view
    pub total_pages: usize,
    pub page_size: usize,
    /// Items in the whole (filtered) view, not just this page
    pub total_items: usize,
}

impl<T> Page<T> {
    /// 1-based inclusive range of items shown, `None` when empty
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.page - 1) * self.page_size + 1;
        Some((start, start + self.items.len() - 1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}

fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page number into `[1, max(1, total_pages)]`
pub fn clamp_page(requested: usize, total_items: usize, page_size: usize) -> usize {
    requested.clamp(1, total_pages(total_items, page_size).max(1))
}

/// Slice out page `requested` of `items`
pub fn paginate<T: Clone>(items: &[T], requested: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = clamp_page(requested, items.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages: total_pages(items.len(), page_size),
        page_size,
        total_items: items.len(),
    }
}

/// Current page of a table whose row count changes underneath it
///
/// Call [`Pager::sync`] whenever the filtered count may have changed so the
/// page never points past the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next(&mut self, total_items: usize) -> usize {
        self.page = clamp_page(self.page + 1, total_items, self.page_size);
        self.page
    }

    pub fn previous(&mut self) -> usize {
        self.page = self.page.saturating_sub(1).max(1);
        self.page
    }

    /// Re-clamp against the current filtered count and return the page
    pub fn sync(&mut self, total_items: usize) -> usize {
        self.page = clamp_page(self.page, total_items, self.page_size);
        self.page
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
