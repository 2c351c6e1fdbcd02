//! Lazy enumeration over linked pages.
//!
//! A [`PageIterator`] owns the first page, fetched eagerly by the operation
//! that created it, and a callback that fetches a page by its link. Each call
//! to [`PageIterator::iter`] starts again from the stored first page and
//! fetches every later page anew when the enumeration reaches it; decoded
//! pages are not kept between enumerations.

use std::fmt;
use std::vec;

use caldera_core::paging::Page;

use crate::error::Result;

/// Fetches the page behind a `next_page` link.
pub type PageFetcher<P> = Box<dyn Fn(&str) -> Result<P>>;

/// A paginated resource presented as one sequence.
pub struct PageIterator<P: Page> {
    first: P,
    fetch: PageFetcher<P>,
}

impl<P: Page> PageIterator<P> {
    pub fn new(first: P, fetch: impl Fn(&str) -> Result<P> + 'static) -> Self {
        Self {
            first,
            fetch: Box::new(fetch),
        }
    }

    /// The eagerly fetched first page.
    pub fn first_page(&self) -> &P {
        &self.first
    }

    /// Starts a fresh enumeration.
    pub fn iter(&self) -> PageCursor<'_, P> {
        let state = match self.first.next_page() {
            Some(link) => PageState::HasMore(link.to_string()),
            None => PageState::Exhausted,
        };
        PageCursor {
            items: self.first.clone().into_items().into_iter(),
            state,
            fetch: &self.fetch,
            fetched: 0,
        }
    }

    /// Drains every page into a vector, stopping at the first error.
    pub fn collect_all(&self) -> Result<Vec<P::Item>> {
        self.iter().collect()
    }
}

impl<P: Page + fmt::Debug> fmt::Debug for PageIterator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIterator")
            .field("first", &self.first)
            .finish_non_exhaustive()
    }
}

impl<'a, P: Page> IntoIterator for &'a PageIterator<P> {
    type Item = Result<P::Item>;
    type IntoIter = PageCursor<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageState {
    HasMore(String),
    Exhausted,
}

/// One pass over a [`PageIterator`].
///
/// Yields `Err` once if fetching a later page fails, then ends.
pub struct PageCursor<'a, P: Page> {
    items: vec::IntoIter<P::Item>,
    state: PageState,
    fetch: &'a PageFetcher<P>,
    fetched: usize,
}

impl<P: Page> PageCursor<'_, P> {
    /// Pages fetched over the network during this pass.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }
}

impl<P: Page> Iterator for PageCursor<'_, P> {
    type Item = Result<P::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.items.next() {
                return Some(Ok(item));
            }

            let link = match std::mem::replace(&mut self.state, PageState::Exhausted) {
                PageState::HasMore(link) => link,
                PageState::Exhausted => return None,
            };

            tracing::debug!(link = %link, "Fetching next page");
            let page = match (self.fetch)(&link) {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(link = %link, error = %err, "Page fetch failed");
                    return Some(Err(err));
                }
            };
            self.fetched += 1;

            let info = page.page_info();
            tracing::debug!(current = info.current, total = info.total, "Fetched page");
            if let Some(next) = page.next_page() {
                self.state = PageState::HasMore(next.to_string());
            }
            self.items = page.into_items().into_iter();
        }
    }
}
