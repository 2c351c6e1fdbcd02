//! Availability CLI command.

use std::str::FromStr;

use caldera_core::availability::{AvailabilityRequest, AvailabilityRequestBuilder};
use caldera_core::builder::{Build, ValidationError};
use caldera_core::time::codec::parse_instant;
use chrono::{DateTime, Utc};
use clap::Parser;

/// Query availability for a set of required participants.
#[derive(Debug, Parser)]
pub struct AvailabilityCommand {
    /// Account sub that must attend (repeatable).
    #[arg(long = "participant", required = true)]
    pub participants: Vec<String>,

    /// Required duration in minutes.
    #[arg(long)]
    pub duration: u32,

    /// Window to search, as `<start>/<end>` UTC instants (repeatable).
    #[arg(long = "period")]
    pub periods: Vec<Period>,

    /// Granularity of proposed start times, in minutes.
    #[arg(long)]
    pub start_interval: Option<u32>,
}

impl AvailabilityCommand {
    /// Build the request, failing on the first invalid argument.
    pub fn to_request(&self) -> Result<AvailabilityRequest, ValidationError> {
        let mut builder = AvailabilityRequestBuilder::new();
        builder
            .add_required_participants(&self.participants)?
            .required_duration(self.duration)?;
        for period in &self.periods {
            builder.add_available_period(period.start, period.end)?;
        }
        if let Some(minutes) = self.start_interval {
            builder.start_interval(minutes)?;
        }
        builder.build()
    }
}

/// A `<start>/<end>` pair of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| format!("expected <start>/<end>, got {:?}", s))?;
        let instant = |text: &str| {
            parse_instant(text).ok_or_else(|| format!("invalid instant: {:?}", text))
        };
        Ok(Self {
            start: instant(start)?,
            end: instant(end)?,
        })
    }
}
