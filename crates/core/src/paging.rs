//! Pagination metadata carried by list responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The `pages` object of a list response. A missing `next_page` marks the
/// last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current: u32,
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

impl PageInfo {
    /// Metadata for a response that fits on one page.
    pub fn single() -> Self {
        Self {
            current: 1,
            total: 1,
            next_page: None,
        }
    }
}

/// A decoded page of a list resource.
pub trait Page: DeserializeOwned + Clone {
    type Item;

    fn page_info(&self) -> &PageInfo;

    fn into_items(self) -> Vec<Self::Item>;

    /// Link to the following page, if any.
    fn next_page(&self) -> Option<&str> {
        self.page_info().next_page.as_deref()
    }
}
