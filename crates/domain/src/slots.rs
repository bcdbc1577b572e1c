// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability slots and free-range merging.
//!
//! The booking API reports one day as a sequence of fixed-width slots, each
//! flagged available or not. The calendar shows contiguous free ranges
//! instead, so consecutive available slots are merged here.
//!
//! ## Invariants
//!
//! - Input slots are time-ordered and contiguous (server guarantee)
//! - Slot widths are not assumed to be uniform
//! - Output ranges are ordered, non-overlapping and maximal

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Time, macros::format_description};

/// One scheduler slot for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start (wall clock).
    #[serde(with = "hhmm")]
    pub start: Time,
    /// Slot end (wall clock).
    #[serde(with = "hhmm")]
    pub end: Time,
    /// Whether at least one technician can take a job in this slot.
    pub available: bool,
    /// Technicians free for the whole slot.
    #[serde(default)]
    pub available_tech_ids: Vec<i64>,
}

impl TimeSlot {
    /// Creates a new slot.
    #[must_use]
    pub const fn new(start: Time, end: Time, available: bool) -> Self {
        Self {
            start,
            end,
            available,
            available_tech_ids: Vec::new(),
        }
    }
}

/// A maximal run of available slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeRange {
    /// Start of the first slot in the run.
    #[serde(with = "hhmm")]
    pub start: Time,
    /// End of the last slot in the run.
    #[serde(with = "hhmm")]
    pub end: Time,
}

/// Merges consecutive available slots into free ranges.
///
/// A single left-to-right scan. An unavailable slot closes the open range,
/// if any.
///
/// # Example
///
/// ```text
/// 09:00-09:30 available
/// 09:30-10:00 available
/// 10:00-10:30 unavailable
/// 10:30-11:00 available
///
/// => [09:00-10:00, 10:30-11:00]
/// ```
#[must_use]
pub fn merge_available_ranges(slots: &[TimeSlot]) -> Vec<FreeRange> {
    let mut ranges: Vec<FreeRange> = Vec::new();
    let mut open: Option<FreeRange> = None;

    for slot in slots {
        if slot.available {
            let start: Time = open.map_or(slot.start, |range| range.start);
            open = Some(FreeRange {
                start,
                end: slot.end,
            });
        } else if let Some(range) = open.take() {
            ranges.push(range);
        }
    }

    if let Some(range) = open {
        ranges.push(range);
    }

    ranges
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
///
/// Returns an error if the text matches neither form.
pub fn parse_time(text: &str) -> Result<Time, DomainError> {
    let trimmed: &str = text.trim();
    Time::parse(trimmed, format_description!("[hour]:[minute]"))
        .or_else(|_| Time::parse(trimmed, format_description!("[hour]:[minute]:[second]")))
        .map_err(|_| DomainError::InvalidTime(text.to_string()))
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if the text is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, DomainError> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: text.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Serde adapter for `HH:MM` wall-clock times.
pub mod hhmm {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    /// Serializes a time as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &Time, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:02}:{:02}", value.hour(), value.minute()))
    }

    /// Deserializes `HH:MM` or `HH:MM:SS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid time.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Time, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: String = String::deserialize(deserializer)?;
        super::parse_time(&text).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*value))
    }

    /// Deserializes a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: String = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(serde::de::Error::custom)
    }
}
