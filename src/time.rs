//! Time-of-day values on the planning day.
//!
//! Parsing and display go through `jiff::civil::Time`. Internally a value is
//! a second offset from midnight that is allowed to run past 24:00, so a
//! schedule overflowing midnight still compares later than the day's end.

use std::fmt;

use jiff::civil::Time;
use serde::{Serialize, Serializer};

const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Seconds since midnight of the planning day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(i64);

impl TimeOfDay {
    pub const fn from_hm(hour: i64, minute: i64) -> Self {
        Self(hour * 3600 + minute * 60)
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn seconds(&self) -> i64 {
        self.0
    }

    /// Parses `HH:MM` (or `HH:MM:SS`).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let time = Time::strptime("%H:%M", input)
            .or_else(|_| Time::strptime("%H:%M:%S", input))
            .ok()?;
        Some(Self(
            i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60 + i64::from(time.second()),
        ))
    }

    pub fn plus_seconds(self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    pub fn plus_minutes(self, minutes: u32) -> Self {
        self.plus_seconds(i64::from(minutes) * 60)
    }

    /// Whole minutes from `self` until `later`, truncated; zero if `later` is not later.
    pub fn minutes_until(self, later: TimeOfDay) -> u32 {
        u32::try_from((later.0 - self.0).max(0) / 60).unwrap_or(u32::MAX)
    }

    fn wall_clock(&self) -> Time {
        let secs = self.0.rem_euclid(SECONDS_PER_DAY);
        jiff::civil::time((secs / 3600) as i8, ((secs % 3600) / 60) as i8, (secs % 60) as i8, 0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wall_clock().strftime("%H:%M"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
