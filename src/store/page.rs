//! Offset pagination for list queries.

use serde::Serialize;

/// A request for one page of results. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: usize = 10;

    /// Page 0 is read as page 1; a page size of 0 falls back to the default.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: if per_page == 0 {
                Self::DEFAULT_PER_PAGE
            } else {
                per_page
            },
        }
    }

    pub fn first(per_page: usize) -> Self {
        Self::new(1, per_page)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// `LIMIT` and `OFFSET` for SQLite.
    ///
    /// `None` when the offset does not fit in an `i64`: no row can sit that
    /// far in. An oversized page size is capped at `i64::MAX`.
    pub(crate) fn sql_bounds(&self) -> Option<(i64, i64)> {
        let limit = i64::try_from(self.per_page).unwrap_or(i64::MAX);
        let offset = (self.page - 1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())?;
        Some((limit, offset))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(Self::DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total,
        }
    }

    /// Number of pages; at least 1 even when there are no items.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
