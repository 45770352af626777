//! List and bulk-operation envelopes

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 1000;

/// `limit` / `offset` pagination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PageRequest {
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Cut one page out of the full, ordered result.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let count = items.len();
        let results = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect();
        Page { count, results }
    }
}

/// One page of a list; `count` is the size of the unpaginated result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Bulk delete request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchDeleteFailure {
    pub id: i64,
    pub reason: String,
}

/// Outcome of a bulk delete; each id succeeds or fails on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchDeleteResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub failures: Vec<BatchDeleteFailure>,
}
