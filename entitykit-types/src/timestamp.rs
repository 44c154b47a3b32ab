//! Unix-second timestamps for entity bookkeeping fields.
//!
//! `created` and `changed` are stored at second resolution. Two saves in
//! the same second would otherwise produce the same `changed` value, so
//! [`Timestamp::tick`] moves forward by one second when the clock has not
//! advanced past the previous value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Creates a timestamp from seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the seconds since the epoch.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Returns the next timestamp after `self`, given the current time.
    ///
    /// The result is `now` if the clock has moved past `self`, otherwise
    /// `self + 1`. It is always strictly greater than `self`.
    #[must_use]
    pub fn tick(&self, now: Self) -> Self {
        if now > *self {
            now
        } else {
            Self(self.0.saturating_add(1))
        }
    }

    /// Converts to a UTC date-time, if the value is in chrono's range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// Parses an RFC 3339 string such as `2024-01-31T12:00:00Z`.
    pub fn parse_rfc3339(s: &str) -> crate::Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.timestamp()))
            .map_err(|e| crate::Error::InvalidTimestamp(format!("{s}: {e}")))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}", self.0),
        }
    }
}
