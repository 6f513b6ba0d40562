//! Pagination request/response model.
//!
//! # Invariants
//! - `size` is always in `1..=MAX_PAGE_SIZE`.
//! - `total_pages` is `ceil(total_elements / size)`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Builds a request; a missing or zero size falls back to the default and
    /// oversized requests are clamped.
    pub fn of(number: u32, size: Option<u32>) -> Self {
        let size = match size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(value) if value > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
            Some(value) => value,
        };
        Self { number, size }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        i64::from(self.number) * i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// One slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMetadata,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        Self {
            content,
            page: PageMetadata {
                size: request.size(),
                number: request.number(),
                total_elements,
                total_pages: total_elements.div_ceil(size),
            },
        }
    }
}
