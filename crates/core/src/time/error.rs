use thiserror::Error;

/// Errors produced while constructing, parsing or inspecting time values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The year/month/day triple is not a calendar date.
    #[error("Invalid calendar date: year {year}, month {month}, day {day}")]
    DateRange { year: i32, month: u32, day: u32 },
    /// The text matches none of the accepted time formats.
    #[error("Unable to decode time value: {value:?}")]
    Decode { value: String },
    /// The requested component does not exist on this variant.
    #[error("Event time has no {0} component")]
    InvalidState(&'static str),
}

impl TimeError {
    pub(crate) fn decode(value: impl Into<String>) -> Self {
        TimeError::Decode {
            value: value.into(),
        }
    }
}
