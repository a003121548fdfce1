//! Canonical `YYYY-MM-DD` date keys.
//!
//! Every event bucket in the store is keyed by a `DateKey`. The textual form
//! is the only format that leaves the process (the events file), so
//! `Display`, `FromStr` and serde all agree on it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DaybookError, DaybookResult};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> DaybookResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DateKey)
            .ok_or_else(|| DaybookError::InvalidDateKey(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Today according to the local clock.
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Weekday index with Sunday = 0.
    pub fn weekday_index(&self) -> usize {
        self.0.weekday().num_days_from_sunday() as usize
    }

    /// `days` later (or earlier, when negative). Fails past chrono's date range.
    pub fn add_days(&self, days: i64) -> DaybookResult<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(DateKey)
            .ok_or(DaybookError::DateOutOfRange { date: *self, days })
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields; the key format does not
        if trimmed.len() != 10 {
            return Err(DaybookError::InvalidDateKey(s.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map(DateKey)
            .map_err(|_| DaybookError::InvalidDateKey(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
