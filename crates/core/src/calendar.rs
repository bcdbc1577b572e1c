// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar pre-load.
//!
//! The booking calendar shows a whole window of days at once. Each day is an
//! independent request to the availability endpoint; requests run through
//! [`bounded_concurrent_map`] so the booking API never sees more than `limit`
//! of them at a time.
//!
//! A day that fails to load does not fail the calendar. It is returned with
//! `failed = true` and no ranges, and the rest of the window still renders.

use crate::batch::bounded_concurrent_map;
use crate::error::CoreError;
use aircare_domain::{FreeRange, TimeSlot, merge_available_ranges};
use std::convert::Infallible;
use std::future::Future;
use time::Date;
use tracing::{debug, warn};

/// Largest window the calendar will pre-load.
pub const MAX_PRELOAD_DAYS: u16 = 62;

/// Something that can report the slots of one day.
///
/// The booking API is the production implementation; tests use in-memory
/// sources.
pub trait AvailabilitySource {
    /// Fetches the time-ordered slots for `date`.
    fn fetch_day(&self, date: Date)
    -> impl Future<Output = Result<Vec<TimeSlot>, CoreError>> + Send;
}

/// One pre-loaded calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    /// The day.
    pub date: Date,
    /// Raw slots as reported by the source.
    pub slots: Vec<TimeSlot>,
    /// Merged free ranges.
    pub ranges: Vec<FreeRange>,
    /// Whether loading this day failed.
    pub failed: bool,
}

impl CalendarDay {
    /// A successfully loaded day.
    #[must_use]
    pub fn loaded(date: Date, slots: Vec<TimeSlot>) -> Self {
        let ranges: Vec<FreeRange> = merge_available_ranges(&slots);
        Self {
            date,
            slots,
            ranges,
            failed: false,
        }
    }

    /// A day that could not be loaded.
    #[must_use]
    pub const fn failed(date: Date) -> Self {
        Self {
            date,
            slots: Vec::new(),
            ranges: Vec::new(),
            failed: true,
        }
    }

    /// Whether any technician is free at some point on this day.
    #[must_use]
    pub fn has_availability(&self) -> bool {
        !self.ranges.is_empty()
    }
}

/// Lists `days` consecutive dates starting at `from`.
///
/// # Errors
///
/// Returns an error if `days` is 0 or larger than [`MAX_PRELOAD_DAYS`], or if
/// the window runs past the last representable date.
pub fn calendar_dates(from: Date, days: u16) -> Result<Vec<Date>, CoreError> {
    if days == 0 || days > MAX_PRELOAD_DAYS {
        return Err(CoreError::InvalidWindow {
            days,
            max: MAX_PRELOAD_DAYS,
        });
    }

    let mut dates: Vec<Date> = Vec::with_capacity(usize::from(days));
    let mut current: Date = from;
    dates.push(current);

    for _ in 1..days {
        current = current
            .next_day()
            .ok_or_else(|| CoreError::DateArithmeticOverflow {
                operation: format!("advancing past {current}"),
            })?;
        dates.push(current);
    }

    Ok(dates)
}

/// Loads availability for every date with at most `limit` requests in flight.
///
/// The result is aligned with `dates`. Failed days are logged and returned as
/// [`CalendarDay::failed`].
pub async fn preload_calendar<S>(source: &S, dates: Vec<Date>, limit: usize) -> Vec<CalendarDay>
where
    S: AvailabilitySource + Sync,
{
    let requested: usize = dates.len();

    let days: Vec<CalendarDay> = bounded_concurrent_map(dates, limit, |date, _| async move {
        match source.fetch_day(date).await {
            Ok(slots) => Ok::<CalendarDay, Infallible>(CalendarDay::loaded(date, slots)),
            Err(err) => {
                warn!(%date, error = %err, "Failed to load availability, using empty day");
                Ok(CalendarDay::failed(date))
            }
        }
    })
    .await
    .unwrap_or_else(|never| match never {});

    debug!(
        requested,
        failed = days.iter().filter(|day| day.failed).count(),
        "Calendar pre-load complete"
    );

    days
}
