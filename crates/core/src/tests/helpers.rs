// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AvailabilitySource, CoreError};
use aircare_domain::TimeSlot;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use time::{Date, Month, Time};

pub fn create_test_date(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::March, day).unwrap()
}

pub fn create_test_time(hour: u8, minute: u8) -> Time {
    Time::from_hms(hour, minute, 0).unwrap()
}

/// A morning of four 30-minute slots from 09:00.
pub fn create_test_slots(pattern: [bool; 4]) -> Vec<TimeSlot> {
    let starts = [(9, 0), (9, 30), (10, 0), (10, 30)];
    let ends = [(9, 30), (10, 0), (10, 30), (11, 0)];
    (0..4)
        .map(|i| {
            TimeSlot::new(
                create_test_time(starts[i].0, starts[i].1),
                create_test_time(ends[i].0, ends[i].1),
                pattern[i],
            )
        })
        .collect()
}

/// In-memory availability source.
#[derive(Default)]
pub struct StubSource {
    days: HashMap<Date, Vec<TimeSlot>>,
    failing: HashSet<Date>,
    delays: HashMap<Date, Duration>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn with_day(mut self, date: Date, slots: Vec<TimeSlot>) -> Self {
        self.days.insert(date, slots);
        self
    }

    pub fn with_failure(mut self, date: Date) -> Self {
        self.failing.insert(date);
        self
    }

    pub fn with_delay(mut self, date: Date, millis: u64) -> Self {
        self.delays.insert(date, Duration::from_millis(millis));
        self
    }
}

impl AvailabilitySource for StubSource {
    fn fetch_day(
        &self,
        date: Date,
    ) -> impl Future<Output = Result<Vec<TimeSlot>, CoreError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let result = if self.failing.contains(&date) {
            Err(CoreError::SourceUnavailable {
                date,
                reason: String::from("connection refused"),
            })
        } else {
            Ok(self.days.get(&date).cloned().unwrap_or_default())
        };
        let delay: Duration = self.delays.get(&date).copied().unwrap_or_default();

        async move {
            tokio::time::sleep(delay).await;
            result
        }
    }
}
