//! Serde helpers shared by request and response types.
//!
//! - [`Field`] keeps "omitted", "explicit null" and "value" apart on the wire.
//! - [`instant`] and [`optional_instant`] encode `DateTime<Utc>` fields in the
//!   API's instant format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::time::codec::{format_instant, parse_instant};

/// An optional request field with three states.
///
/// Use with `#[serde(default, skip_serializing_if = "Field::is_omitted")]`:
/// `Omitted` leaves the member out, `Null` writes `null`, `Value` writes the
/// value. Deserializing reverses the mapping (a missing member falls back to
/// the `Omitted` default).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Omitted,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Field::Omitted)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// The value, if one is present.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            Field::Omitted | Field::Null => None,
        }
    }

    /// Converts to the nested option form: `None` for omitted,
    /// `Some(None)` for null.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Field::Omitted => None,
            Field::Null => Some(None),
            Field::Value(value) => Some(Some(value)),
        }
    }
}

impl<T> From<Option<Option<T>>> for Field<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Field::Omitted,
            Some(None) => Field::Null,
            Some(Some(value)) => Field::Value(value),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reached when the container forgot `skip_serializing_if`.
            Field::Omitted | Field::Null => serializer.serialize_none(),
            Field::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

/// `#[serde(with = "caldera_core::serde::instant")]` for `DateTime<Utc>`.
pub mod instant {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_instant(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_instant(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid instant: {text:?}")))
    }
}

/// Like [`instant`], for `Option<DateTime<Utc>>`.
pub mod optional_instant {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&format_instant(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse_instant(&text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid instant: {text:?}"))),
            None => Ok(None),
        }
    }
}
