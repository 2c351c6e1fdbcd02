//! Wire codec for [`EventTime`].
//!
//! The API emits three shapes for a time value:
//!
//! - a bare instant string, `"2014-08-05T15:30:00Z"`
//! - a bare date string, `"2014-08-05"`
//! - an object, `{"time": "<instant or date>", "tzid": "Europe/London"}`
//!
//! All three are accepted on input. Output is always the object form, so the
//! codec is deliberately asymmetric. Text is decoded by an ordered chain:
//! instant formats first, then the date format.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::date::Date;
use super::error::TimeError;
use super::event_time::EventTime;

/// Zone assigned to bare strings that arrive without one.
pub const DEFAULT_TZID: &str = "Etc/UTC";

/// Accepted instant formats, tried in order.
const INSTANT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.fZ"];

/// `%.f` prints no fraction for whole seconds.
const INSTANT_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// A time string after decoding, before a zone is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeText {
    Instant(DateTime<Utc>),
    Date(Date),
}

/// Parses an instant in one of the accepted formats.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if !has_instant_shape(text) {
        return None;
    }
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DDTHH:MM:SS` with zero-padded fields, an optional `.` and at
/// least one fraction digit, then `Z`.
fn has_instant_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 20 || bytes[bytes.len() - 1] != b'Z' {
        return false;
    }
    let fixed = bytes[..19].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    });
    let fraction = &bytes[19..bytes.len() - 1];
    fixed
        && match fraction.split_first() {
            None => true,
            Some((&b'.', digits)) => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
            Some(_) => false,
        }
}

/// Formats an instant the way the API expects it.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(INSTANT_OUTPUT_FORMAT).to_string()
}

/// Runs the decoding chain over a single time string.
pub fn parse_time_text(text: &str) -> Result<TimeText, TimeError> {
    if let Some(instant) = parse_instant(text) {
        return Ok(TimeText::Instant(instant));
    }
    if let Some(date) = Date::try_parse(text) {
        return Ok(TimeText::Date(date));
    }
    Err(TimeError::decode(text))
}

/// Decodes a bare string, assigning [`DEFAULT_TZID`].
pub fn decode_str(text: &str) -> Result<EventTime, TimeError> {
    decode_zoned(text, DEFAULT_TZID)
}

/// Decodes the object form.
pub fn decode_zoned(time: &str, tzid: &str) -> Result<EventTime, TimeError> {
    Ok(match parse_time_text(time)? {
        TimeText::Instant(instant) => EventTime::from_instant(instant, tzid),
        TimeText::Date(date) => EventTime::from_date(date, tzid),
    })
}

/// The `time` member of the object form.
pub fn encode_time(value: &EventTime) -> String {
    match value {
        EventTime::Instant { timestamp, .. } => format_instant(timestamp),
        EventTime::DateOnly { date, .. } => date.to_string(),
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EventTime", 2)?;
        state.serialize_field("time", &encode_time(self))?;
        state.serialize_field("tzid", self.tzid())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EventTimeVisitor)
    }
}

struct EventTimeVisitor;

impl<'de> Visitor<'de> for EventTimeVisitor {
    type Value = EventTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an instant string, a date string or a {time, tzid} object")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<EventTime, E> {
        decode_str(value).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<EventTime, A::Error> {
        let mut time: Option<String> = None;
        let mut tzid: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "time" => time = Some(map.next_value()?),
                "tzid" => tzid = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let time = time.ok_or_else(|| de::Error::missing_field("time"))?;
        let tzid = tzid.unwrap_or_else(|| DEFAULT_TZID.to_string());
        decode_zoned(&time, &tzid).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn instant(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 8, 5, h, m, s).unwrap()
    }

    #[test]
    fn test_decode_bare_instant_uses_default_tzid() {
        let time: EventTime = serde_json::from_value(json!("2014-08-05T15:30:00Z")).unwrap();
        assert_eq!(time, EventTime::from_instant(instant(15, 30, 0), "Etc/UTC"));
    }

    #[test]
    fn test_decode_bare_instant_with_fraction() {
        let time = decode_str("2014-08-05T15:30:00.250Z").unwrap();
        let expected = instant(15, 30, 0) + chrono::Duration::milliseconds(250);
        assert_eq!(time.instant().unwrap(), expected);
    }

    #[test]
    fn test_decode_bare_date() {
        let time: EventTime = serde_json::from_value(json!("2014-08-05")).unwrap();
        assert_eq!(
            time,
            EventTime::from_date(Date::new(2014, 8, 5).unwrap(), DEFAULT_TZID)
        );
    }

    #[test]
    fn test_decode_object_with_instant() {
        let time: EventTime = serde_json::from_value(json!({
            "time": "2014-08-05T15:30:00Z",
            "tzid": "Europe/London"
        }))
        .unwrap();
        assert_eq!(
            time,
            EventTime::from_instant(instant(15, 30, 0), "Europe/London")
        );
    }

    #[test]
    fn test_decode_object_with_date() {
        let time: EventTime = serde_json::from_value(json!({
            "time": "2014-08-05",
            "tzid": "America/Chicago"
        }))
        .unwrap();
        assert_eq!(time.date().unwrap(), Date::new(2014, 8, 5).unwrap());
        assert_eq!(time.tzid(), "America/Chicago");
    }

    #[test]
    fn test_decode_object_without_tzid_uses_default() {
        let time: EventTime = serde_json::from_value(json!({"time": "2014-08-05"})).unwrap();
        assert_eq!(time.tzid(), DEFAULT_TZID);
    }

    #[test]
    fn test_decode_object_ignores_unknown_members() {
        let time: EventTime = serde_json::from_value(json!({
            "time": "2014-08-05",
            "tzid": "Etc/UTC",
            "display": "Tue 5 Aug"
        }))
        .unwrap();
        assert!(!time.has_time());
    }

    #[test]
    fn test_decode_object_missing_time_fails() {
        let result: Result<EventTime, _> = serde_json::from_value(json!({"tzid": "Etc/UTC"}));
        assert!(result.unwrap_err().to_string().contains("missing field `time`"));
    }

    #[test]
    fn test_decode_garbage_carries_raw_value() {
        assert_eq!(decode_str("next tuesday"), Err(TimeError::decode("next tuesday")));
        let result: Result<EventTime, _> = serde_json::from_value(json!("next tuesday"));
        assert!(result.unwrap_err().to_string().contains("next tuesday"));
    }

    #[test]
    fn test_decode_rejects_non_string_scalars() {
        let result: Result<EventTime, _> = serde_json::from_value(json!(1407252600));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_time_text_prefers_instant() {
        assert_eq!(
            parse_time_text("2014-08-05T00:00:00Z").unwrap(),
            TimeText::Instant(instant(0, 0, 0))
        );
        assert_eq!(
            parse_time_text("2014-08-05").unwrap(),
            TimeText::Date(Date::new(2014, 8, 5).unwrap())
        );
    }

    #[test]
    fn test_encode_instant_uses_object_form() {
        let time = EventTime::from_instant(instant(15, 30, 0), "Europe/London");
        let value = serde_json::to_value(time).unwrap();
        assert_eq!(
            value,
            json!({"time": "2014-08-05T15:30:00Z", "tzid": "Europe/London"})
        );
    }

    #[test]
    fn test_encode_date_uses_object_form() {
        let time = EventTime::from_date(Date::new(2014, 8, 5).unwrap(), "Etc/UTC");
        let value = serde_json::to_value(time).unwrap();
        assert_eq!(value, json!({"time": "2014-08-05", "tzid": "Etc/UTC"}));
    }

    #[test]
    fn test_format_instant_keeps_milliseconds() {
        let value = instant(15, 30, 0) + chrono::Duration::milliseconds(5);
        assert_eq!(format_instant(&value), "2014-08-05T15:30:00.005Z");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            EventTime::from_date(Date::new(2020, 2, 29).unwrap(), "Etc/UTC"),
            EventTime::from_date(Date::new(1999, 12, 31).unwrap(), "Pacific/Auckland"),
            EventTime::from_instant(instant(15, 30, 0), "Europe/London"),
            EventTime::from_instant(
                instant(23, 59, 59) + chrono::Duration::milliseconds(999),
                "Asia/Tokyo",
            ),
            EventTime::from_date(Date::new(0, 1, 1).unwrap(), "Etc/UTC"),
            EventTime::from_date(Date::new(9999, 12, 31).unwrap(), "Etc/UTC"),
        ];
        for time in samples {
            let json = serde_json::to_string(&time).unwrap();
            let back: EventTime = serde_json::from_str(&json).unwrap();
            assert_eq!(back, time, "{json}");
        }
    }

    #[test]
    fn test_instant_fields_must_be_zero_padded() {
        for text in [
            "2014-8-5T1:2:3Z",
            "2014-08-05T15:30:0Z",
            "+2014-08-05T15:30:00Z",
            "12014-08-05T15:30:00Z",
            "2014-08-05T15:30:00.Z",
            "2014-08-05T15:30:00.5x",
        ] {
            assert_eq!(parse_instant(text), None, "{text}");
            assert_eq!(decode_str(text), Err(TimeError::decode(text)), "{text}");
        }
    }

    #[test]
    fn test_instant_shapes_accepted() {
        assert_eq!(parse_instant("2014-08-05T15:30:00Z"), Some(instant(15, 30, 0)));
        assert_eq!(
            parse_instant("2014-08-05T15:30:00.250Z"),
            Some(instant(15, 30, 0) + chrono::Duration::milliseconds(250))
        );
    }
}
