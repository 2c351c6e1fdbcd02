use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::TimeError;

/// Years expressible as `YYYY`.
const YEARS: RangeInclusive<i32> = 0..=9999;

/// A calendar day with no time-of-day or zone.
///
/// Stored as the number of days from 0001-01-01 (proleptic Gregorian), so
/// equality and ordering are plain integer comparisons. The textual form is
/// strictly `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    days: i32,
}

impl Date {
    /// Creates a date, failing when the triple is not a calendar date or the
    /// year does not fit the four-digit text form.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !YEARS.contains(&year) {
            return Err(TimeError::DateRange { year, month, day });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Self {
                days: date.num_days_from_ce(),
            })
            .ok_or(TimeError::DateRange { year, month, day })
    }

    /// Parses the strict `YYYY-MM-DD` form.
    ///
    /// Text of the wrong shape fails with [`TimeError::Decode`]; a well-shaped
    /// but impossible date (e.g. `2021-02-29`) fails with
    /// [`TimeError::DateRange`].
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        if !has_date_shape(text) {
            return Err(TimeError::decode(text));
        }
        let year = digits(&text[0..4]) as i32;
        let month = digits(&text[5..7]);
        let day = digits(&text[8..10]);
        Self::new(year, month, day)
    }

    /// Like [`Date::parse`], but reports failure as `None`.
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    pub fn year(&self) -> i32 {
        self.to_naive().year()
    }

    pub fn month(&self) -> u32 {
        self.to_naive().month()
    }

    pub fn day(&self) -> u32 {
        self.to_naive().day()
    }

    /// Days elapsed since 0001-01-01.
    pub fn days_from_epoch(&self) -> i32 {
        self.days
    }

    pub fn to_naive(&self) -> NaiveDate {
        // `days` only ever comes from a valid NaiveDate.
        NaiveDate::from_num_days_from_ce_opt(self.days).unwrap_or_default()
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = TimeError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.to_naive()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.to_naive();
        write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
    }
}

impl FromStr for Date {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateVisitor;

        impl Visitor<'_> for DateVisitor {
            type Value = Date;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a date in YYYY-MM-DD form")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Date, E> {
                Date::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

/// Exactly four digits, a dash, two digits, a dash, two digits.
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn digits(text: &str) -> u32 {
    text.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}
