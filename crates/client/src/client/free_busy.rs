//! Free/busy API operations.

use super::CalderaClient;
use crate::error::Result;
use crate::paging::PageIterator;
use caldera_core::calendar::{FreeBusyPage, FreeBusyQuery};

impl CalderaClient {
    /// Free/busy blocks matching `query`, one page fetched up front.
    pub fn free_busy(&self, query: &FreeBusyQuery) -> Result<PageIterator<FreeBusyPage>> {
        self.paged(&self.url("/v1/free_busy")?, query.to_query_pairs())
    }
}
