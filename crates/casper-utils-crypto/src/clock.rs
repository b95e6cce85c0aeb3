//! Time sources for token timestamps.

use chrono::{DateTime, FixedOffset, Local};
use std::fmt;

/// A source of the current local time, with its UTC offset.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The system wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parse an RFC 3339 instant, e.g. `2024-01-15T10:30:00+00:00`.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// ISO 8601 local time with offset, second precision.
pub fn iso8601_with_offset(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
