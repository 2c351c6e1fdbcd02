//! Event API operations.

use reqwest::Method;

use super::CalderaClient;
use crate::error::{ClientError, Result};
use crate::paging::PageIterator;
use caldera_core::builder::ValidationError;
use caldera_core::calendar::{
    DeleteEventRequest, ReadEventsPage, ReadEventsQuery, UpsertEventRequest,
};
use caldera_core::paging::Page;
use url::Url;

impl CalderaClient {
    /// Events matching `query`, one page fetched up front.
    pub fn read_events(&self, query: &ReadEventsQuery) -> Result<PageIterator<ReadEventsPage>> {
        self.paged(&self.url("/v1/events")?, query.to_query_pairs())
    }

    /// Create or update an event in `calendar_id`.
    pub fn upsert_event(&self, calendar_id: &str, request: &UpsertEventRequest) -> Result<()> {
        let url = self.calendar_events_url(calendar_id)?;
        let request = self
            .request(Method::POST, url)
            .with_json_body(serde_json::to_string(request)?);
        self.execute(request)?;
        Ok(())
    }

    /// Delete an event this application created in `calendar_id`.
    pub fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        if event_id.trim().is_empty() {
            return Err(ValidationError::Blank { field: "event_id" }.into());
        }
        let url = self.calendar_events_url(calendar_id)?;
        let body = DeleteEventRequest {
            event_id: event_id.to_string(),
        };
        let request = self
            .request(Method::DELETE, url)
            .with_json_body(serde_json::to_string(&body)?);
        self.execute(request)?;
        Ok(())
    }

    /// `/v1/calendars/{calendar_id}/events`, with the id as one path segment.
    fn calendar_events_url(&self, calendar_id: &str) -> Result<String> {
        if calendar_id.trim().is_empty() {
            return Err(ValidationError::Blank {
                field: "calendar_id",
            }
            .into());
        }
        let mut url = self.endpoints.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidInput("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v1", "calendars", calendar_id, "events"]);
        Ok(url.to_string())
    }

    /// Fetches the first page now and returns an iterator that follows
    /// `next_page` links with this client's credentials.
    pub(crate) fn paged<P: Page + 'static>(
        &self,
        url: &str,
        query: Vec<(String, String)>,
    ) -> Result<PageIterator<P>> {
        let first: P = self.get_json(url, query)?;
        let client = self.clone();
        Ok(PageIterator::new(first, move |link: &str| {
            client.check_page_link(link)?;
            client.get_json(link, Vec::new())
        }))
    }

    /// Page links must stay on the API host; the bearer token goes nowhere else.
    fn check_page_link(&self, link: &str) -> Result<()> {
        let target = Url::parse(link)?;
        if target.origin() != self.endpoints.api_url.origin() {
            return Err(ClientError::InvalidResponse(format!(
                "next_page link {} is outside {}",
                link, self.endpoints.api_url
            )));
        }
        Ok(())
    }
}
