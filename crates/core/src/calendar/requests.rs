//! Request types for event operations.
//!
//! These are pure data types with no I/O; the client turns them into HTTP
//! requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builder::{require, require_not_blank, require_ordered, Build, Result, ValidationError};
use crate::serde::Field;
use crate::time::{Date, EventTime, DEFAULT_TZID};

/// Whether an event blocks time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transparency {
    Opaque,
    Transparent,
}

impl Transparency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transparency::Opaque => "opaque",
            Transparency::Transparent => "transparent",
        }
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transparency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "opaque" => Ok(Transparency::Opaque),
            "transparent" => Ok(Transparency::Transparent),
            other => Err(ValidationError::Unsupported {
                field: "transparency",
                value: other.to_string(),
            }),
        }
    }
}

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub description: String,
}

/// Payload for creating or updating an event owned by this application.
///
/// `location` and `url` distinguish "leave unchanged" (omitted) from
/// "clear" (`null`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertEventRequest {
    pub event_id: String,
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default, skip_serializing_if = "Field::is_omitted")]
    pub location: Field<Location>,
    #[serde(default, skip_serializing_if = "Field::is_omitted")]
    pub url: Field<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<Transparency>,
}

/// Builds an [`UpsertEventRequest`].
#[derive(Debug, Clone, Default)]
pub struct UpsertEventRequestBuilder {
    event_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<EventTime>,
    end: Option<EventTime>,
    location: Field<Location>,
    url: Field<String>,
    transparency: Option<Transparency>,
}

impl UpsertEventRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_id(&mut self, event_id: &str) -> Result<&mut Self> {
        require_not_blank("event_id", event_id)?;
        self.event_id = Some(event_id.to_string());
        Ok(self)
    }

    pub fn summary(&mut self, summary: &str) -> Result<&mut Self> {
        require_not_blank("summary", summary)?;
        self.summary = Some(summary.to_string());
        Ok(self)
    }

    /// An empty description is allowed.
    pub fn description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn start(&mut self, start: EventTime) -> &mut Self {
        self.start = Some(start);
        self
    }

    pub fn end(&mut self, end: EventTime) -> &mut Self {
        self.end = Some(end);
        self
    }

    /// All-day bounds in the given zone.
    pub fn all_day(&mut self, start: Date, end: Date, tzid: &str) -> Result<&mut Self> {
        require_not_blank("tzid", tzid)?;
        if start > end {
            return Err(ValidationError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        self.start = Some(EventTime::from_date(start, tzid));
        self.end = Some(EventTime::from_date(end, tzid));
        Ok(self)
    }

    pub fn location(&mut self, description: &str) -> Result<&mut Self> {
        require_not_blank("location", description)?;
        self.location = Field::Value(Location {
            description: description.to_string(),
        });
        Ok(self)
    }

    /// Sends an explicit `null`, removing the location.
    pub fn clear_location(&mut self) -> &mut Self {
        self.location = Field::Null;
        self
    }

    pub fn url(&mut self, url: &str) -> Result<&mut Self> {
        require_not_blank("url", url)?;
        self.url = Field::Value(url.to_string());
        Ok(self)
    }

    /// Sends an explicit `null`, removing the url.
    pub fn clear_url(&mut self) -> &mut Self {
        self.url = Field::Null;
        self
    }

    pub fn transparency(&mut self, transparency: Transparency) -> &mut Self {
        self.transparency = Some(transparency);
        self
    }

    /// Accepts `"opaque"` or `"transparent"`.
    pub fn transparency_str(&mut self, transparency: &str) -> Result<&mut Self> {
        self.transparency = Some(transparency.parse()?);
        Ok(self)
    }
}

impl Build for UpsertEventRequestBuilder {
    type Output = UpsertEventRequest;

    fn build(&self) -> Result<UpsertEventRequest> {
        let start = require("start", self.start.clone())?;
        let end = require("end", self.end.clone())?;
        check_bounds(&start, &end)?;

        Ok(UpsertEventRequest {
            event_id: require("event_id", self.event_id.clone())?,
            summary: require("summary", self.summary.clone())?,
            description: require("description", self.description.clone())?,
            start,
            end,
            location: self.location.clone(),
            url: self.url.clone(),
            transparency: self.transparency,
        })
    }
}

/// Both bounds must be the same kind, in order.
fn check_bounds(start: &EventTime, end: &EventTime) -> Result<()> {
    match (start, end) {
        (EventTime::Instant { timestamp: s, .. }, EventTime::Instant { timestamp: e, .. }) => {
            require_ordered(s, e)
        }
        (EventTime::DateOnly { date: s, .. }, EventTime::DateOnly { date: e, .. }) if s > e => {
            Err(ValidationError::InvalidPeriod {
                start: s.to_string(),
                end: e.to_string(),
            })
        }
        (EventTime::DateOnly { .. }, EventTime::DateOnly { .. }) => Ok(()),
        _ => Err(ValidationError::Unsupported {
            field: "end",
            value: "all-day and timed bounds cannot be mixed".to_string(),
        }),
    }
}

/// Payload for deleting an event owned by this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEventRequest {
    pub event_id: String,
}

/// Filters for the events listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadEventsQuery {
    pub tzid: String,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub include_deleted: Option<bool>,
    pub include_managed: Option<bool>,
    pub calendar_ids: Vec<String>,
}

impl Default for ReadEventsQuery {
    fn default() -> Self {
        Self {
            tzid: DEFAULT_TZID.to_string(),
            from: None,
            to: None,
            include_deleted: None,
            include_managed: None,
            calendar_ids: Vec::new(),
        }
    }
}

impl ReadEventsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = tzid.into();
        self
    }

    pub fn with_from(mut self, from: Date) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: Date) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = Some(include);
        self
    }

    pub fn with_include_managed(mut self, include: bool) -> Self {
        self.include_managed = Some(include);
        self
    }

    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_ids.push(calendar_id.into());
        self
    }

    /// Query-string pairs in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("tzid".to_string(), self.tzid.clone())];
        push_common(
            &mut pairs,
            self.from,
            self.to,
            self.include_managed,
            &self.calendar_ids,
        );
        if let Some(include) = self.include_deleted {
            pairs.push(("include_deleted".to_string(), include.to_string()));
        }
        pairs
    }
}

/// Filters for the free/busy listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBusyQuery {
    pub tzid: String,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub include_managed: Option<bool>,
    pub calendar_ids: Vec<String>,
}

impl Default for FreeBusyQuery {
    fn default() -> Self {
        Self {
            tzid: DEFAULT_TZID.to_string(),
            from: None,
            to: None,
            include_managed: None,
            calendar_ids: Vec::new(),
        }
    }
}

impl FreeBusyQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = tzid.into();
        self
    }

    pub fn with_from(mut self, from: Date) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: Date) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_include_managed(mut self, include: bool) -> Self {
        self.include_managed = Some(include);
        self
    }

    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_ids.push(calendar_id.into());
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("tzid".to_string(), self.tzid.clone())];
        push_common(
            &mut pairs,
            self.from,
            self.to,
            self.include_managed,
            &self.calendar_ids,
        );
        pairs
    }
}

fn push_common(
    pairs: &mut Vec<(String, String)>,
    from: Option<Date>,
    to: Option<Date>,
    include_managed: Option<bool>,
    calendar_ids: &[String],
) {
    if let Some(from) = from {
        pairs.push(("from".to_string(), from.to_string()));
    }
    if let Some(to) = to {
        pairs.push(("to".to_string(), to.to_string()));
    }
    if let Some(include) = include_managed {
        pairs.push(("include_managed".to_string(), include.to_string()));
    }
    for id in calendar_ids {
        pairs.push(("calendar_ids[]".to_string(), id.clone()));
    }
}
