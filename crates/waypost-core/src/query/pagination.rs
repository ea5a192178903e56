use serde::{Deserialize, Serialize};

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl Pagination {
    /// `pages` is at least 1, even when nothing matched.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            page: page.max(1),
            pages: total.div_ceil(limit).max(1),
        }
    }
}

/// Slice `[offset, offset + limit)` of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl Window {
    pub fn for_page(page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        Self {
            offset: (page.max(1) - 1).saturating_mul(limit),
            limit,
        }
    }

    /// True when the window starts at or after the last item.
    pub fn is_past(&self, total: u64) -> bool {
        self.offset >= total
    }

    /// Apply the window to an in-memory sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}
