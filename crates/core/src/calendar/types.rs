use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::{Location, Transparency};
use crate::paging::{Page, PageInfo};
use crate::time::EventTime;

/// A calendar visible to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub provider_name: String,
    pub profile_id: String,
    pub profile_name: String,
    pub calendar_id: String,
    pub calendar_name: String,
    #[serde(default)]
    pub calendar_readonly: bool,
    #[serde(default)]
    pub calendar_deleted: bool,
    #[serde(default)]
    pub calendar_primary: bool,
}

/// Response body of the calendar listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarsResponse {
    pub calendars: Vec<Calendar>,
}

/// An event as returned by the events listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub calendar_id: String,
    pub event_uid: String,
    /// Only set for events this application created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<Transparency>,
    #[serde(
        default,
        with = "crate::serde::optional_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::serde::optional_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}

impl Event {
    /// Returns true if the event spans whole days.
    pub fn is_all_day(&self) -> bool {
        !self.start.has_time()
    }
}

/// A busy block from the free/busy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBusy {
    pub calendar_id: String,
    pub start: EventTime,
    pub end: EventTime,
    pub free_busy_status: String,
}

/// One page of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEventsPage {
    pub pages: PageInfo,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Page for ReadEventsPage {
    type Item = Event;

    fn page_info(&self) -> &PageInfo {
        &self.pages
    }

    fn into_items(self) -> Vec<Event> {
        self.events
    }
}

/// One page of free/busy blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBusyPage {
    pub pages: PageInfo,
    #[serde(default)]
    pub free_busy: Vec<FreeBusy>,
}

impl Page for FreeBusyPage {
    type Item = FreeBusy;

    fn page_info(&self) -> &PageInfo {
        &self.pages
    }

    fn into_items(self) -> Vec<FreeBusy> {
        self.free_busy
    }
}
