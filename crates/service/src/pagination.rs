//! Pagination utilities for service layer
//!
//! `PageRequest` is the normalized `page`/`size` pair taken from a query
//! string; `PageMetadata` is the `page` block rendered in list envelopes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    /// 0-based page index
    #[serde(default)]
    pub page: u32,
    /// items per page
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 { DEFAULT_PAGE_SIZE }

impl Default for PageRequest {
    fn default() -> Self { Self { page: 0, size: DEFAULT_PAGE_SIZE } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
}

impl PageRequest {
    /// Clamp size into `1..=MAX_PAGE_SIZE`.
    pub fn normalize(self) -> Self {
        Self { page: self.page, size: self.size.clamp(1, MAX_PAGE_SIZE) }
    }

    /// Cut one page out of `items` and describe it.
    pub fn slice<T>(self, items: Vec<T>) -> (Vec<T>, PageMetadata) {
        let req = self.normalize();
        let total = items.len() as u64;
        let size = u64::from(req.size);
        let meta = PageMetadata {
            size: req.size,
            total_elements: total,
            total_pages: total.div_ceil(size),
            number: req.page,
        };
        let skip = usize::try_from(u64::from(req.page) * size).unwrap_or(usize::MAX);
        let page = items.into_iter().skip(skip).take(req.size as usize).collect();
        (page, meta)
    }
}
