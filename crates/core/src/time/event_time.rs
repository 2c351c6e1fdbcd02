use chrono::{DateTime, TimeZone, Utc};

use super::date::Date;
use super::error::TimeError;

/// The start or end of an event: either a whole day or a precise instant,
/// always paired with the IANA zone it was expressed in.
///
/// Instants are normalized to UTC on construction; the `tzid` keeps the zone
/// the caller meant. Two values are equal only when the variant, the value
/// and the `tzid` all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventTime {
    /// An all-day value.
    DateOnly { date: Date, tzid: String },
    /// A moment in time.
    Instant {
        timestamp: DateTime<Utc>,
        tzid: String,
    },
}

impl EventTime {
    /// Creates an all-day event time.
    pub fn from_date(date: Date, tzid: impl Into<String>) -> Self {
        EventTime::DateOnly {
            date,
            tzid: tzid.into(),
        }
    }

    /// Creates an event time from an instant in any zone, storing it as UTC.
    pub fn from_instant<Tz: TimeZone>(instant: DateTime<Tz>, tzid: impl Into<String>) -> Self {
        EventTime::Instant {
            timestamp: instant.with_timezone(&Utc),
            tzid: tzid.into(),
        }
    }

    /// Returns true for the `Instant` variant.
    pub fn has_time(&self) -> bool {
        matches!(self, EventTime::Instant { .. })
    }

    pub fn tzid(&self) -> &str {
        match self {
            EventTime::DateOnly { tzid, .. } | EventTime::Instant { tzid, .. } => tzid,
        }
    }

    /// The UTC instant; fails on an all-day value.
    pub fn instant(&self) -> Result<DateTime<Utc>, TimeError> {
        match self {
            EventTime::Instant { timestamp, .. } => Ok(*timestamp),
            EventTime::DateOnly { .. } => Err(TimeError::InvalidState("instant")),
        }
    }

    /// The calendar day; fails on an instant value.
    pub fn date(&self) -> Result<Date, TimeError> {
        match self {
            EventTime::DateOnly { date, .. } => Ok(*date),
            EventTime::Instant { .. } => Err(TimeError::InvalidState("date")),
        }
    }
}
