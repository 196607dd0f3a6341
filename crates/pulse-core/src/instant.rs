//! Points in time as reported by the time tracking source.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::ValidationError;

/// Formats accepted for timestamps without a UTC offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A timestamp that may or may not carry a UTC offset.
///
/// Toggl always reports offsets, but hand-written exports and older tooling
/// sometimes drop them. Naive instants are kept so that the transformer can
/// reject them explicitly instead of guessing a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryInstant {
    /// An instant with a known UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// A wall-clock reading with no offset information.
    Naive(NaiveDateTime),
}

impl EntryInstant {
    /// Returns the zoned instant, or `None` if this instant is naive.
    #[must_use]
    pub const fn zoned(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Zoned(dt) => Some(*dt),
            Self::Naive(_) => None,
        }
    }

    /// Returns true if the instant carries a UTC offset.
    #[must_use]
    pub const fn is_zoned(&self) -> bool {
        matches!(self, Self::Zoned(_))
    }

    /// Milliseconds since the Unix epoch, floored. `None` for naive instants.
    #[must_use]
    pub fn epoch_millis(&self) -> Option<i64> {
        self.zoned().map(|dt| dt.timestamp_millis())
    }

    /// Converts to UTC, reading a naive instant as UTC wall time.
    pub(crate) fn to_utc_lossy(self) -> DateTime<Utc> {
        match self {
            Self::Zoned(dt) => dt.to_utc(),
            Self::Naive(naive) => naive.and_utc(),
        }
    }
}

impl From<DateTime<FixedOffset>> for EntryInstant {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Zoned(dt)
    }
}

impl From<DateTime<Utc>> for EntryInstant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Zoned(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for EntryInstant {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Naive(naive)
    }
}

impl fmt::Display for EntryInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoned(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Naive(naive) => write!(f, "{}", naive.format(NAIVE_FORMATS[0])),
        }
    }
}

impl FromStr for EntryInstant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Zoned(dt));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(Self::Naive)
            .ok_or_else(|| ValidationError::InvalidInstant {
                value: s.to_string(),
            })
    }
}

impl Serialize for EntryInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
