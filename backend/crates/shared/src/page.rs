//! Pagination primitives
//!
//! Shared request/response shapes for paginated listings. The wire
//! envelope is `{count, results}` with `page`/`page_size` query
//! parameters.

use serde::{Deserialize, Serialize};

/// Default page size when the client does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on client-requested page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Client-supplied pagination parameters.
///
/// Pages are 1-based. Out-of-range values are clamped rather than
/// rejected.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Effective page size after clamping to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the effective page.
    pub fn offset(&self) -> u64 {
        let page = self.page.max(1);
        u64::from(page - 1) * u64::from(self.limit())
    }
}

/// One page of results plus the total match count.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: u64, results: Vec<T>) -> Self {
        Self { count, results }
    }

    /// Map the items while keeping the count.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
