use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::participants::ParticipantGroup;

/// A span of whole minutes, written as `{"minutes": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration {
    pub minutes: u32,
}

impl Duration {
    pub fn minutes(minutes: u32) -> Self {
        Self { minutes }
    }
}

/// A window in which availability may be found.
///
/// `start` must not be after `end`. The type does not check it; the builders
/// that accept periods do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailablePeriod {
    #[serde(with = "crate::serde::instant")]
    pub start: DateTime<Utc>,
    #[serde(with = "crate::serde::instant")]
    pub end: DateTime<Utc>,
}

impl AvailablePeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Minimum and maximum gap on one side of a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Duration>,
}

/// Gaps required around a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<BufferDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<BufferDefinition>,
}

/// Payload for the availability query.
///
/// `available_periods` is always written, as `[]` when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub participants: Vec<ParticipantGroup>,
    pub required_duration: Duration,
    #[serde(default)]
    pub available_periods: Vec<AvailablePeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Buffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_interval: Option<Duration>,
}

/// A participant reference inside an availability result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub sub: String,
}

/// One slot returned by the availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailablePeriodResult {
    #[serde(with = "crate::serde::instant")]
    pub start: DateTime<Utc>,
    #[serde(with = "crate::serde::instant")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<ParticipantRef>,
}

/// Response body of the availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub available_periods: Vec<AvailablePeriodResult>,
}
