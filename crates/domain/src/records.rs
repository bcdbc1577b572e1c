// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed views of records owned by the booking API.
//!
//! The booking API is loosely typed: fields go missing, numbers arrive as
//! strings and statuses grow new values. These records default every field
//! that may be absent so that nothing past the boundary handles raw JSON.

use crate::number::{RawValue, parse_raw, round_money};
use crate::slots::{TimeSlot, iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// Lifecycle state of a job as reported by the booking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Booked, waiting for dispatch.
    Pending,
    /// Dispatched to a technician.
    Assigned,
    /// Technician on site.
    InProgress,
    /// Work finished.
    Completed,
    /// Customer or admin cancelled.
    Cancelled,
    /// Technician handed the job back to the queue.
    Returned,
    /// Any status this console does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Converts this status to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the job still needs work (shown in the admin queue).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Assigned | Self::InProgress | Self::Returned
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Job {
    /// Server identifier.
    pub job_id: i64,
    /// Customer-facing booking code.
    pub booking_code: String,
    /// Lifecycle state.
    pub status: JobStatus,
    /// Kind of work, e.g. "install" or "clean".
    pub job_type: String,
    /// Customer display name.
    pub customer_name: String,
    /// Appointment timestamp as sent by the server.
    pub appointment_datetime: Option<String>,
    /// Assigned technician, if dispatched.
    pub technician_username: Option<String>,
}

const fn default_active() -> bool {
    true
}

/// A technician record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    /// Server identifier.
    #[serde(default)]
    pub technician_id: i64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Contact number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the technician takes new jobs. Absent means active.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// How a promotion discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of the quoted amount.
    #[default]
    Percent,
    /// Fixed baht amount.
    Amount,
}

/// A promotion that can be applied to a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Server identifier.
    #[serde(default)]
    pub promo_id: i64,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Discount kind.
    #[serde(default)]
    pub discount_type: DiscountType,
    /// Percent (0..=100) or baht, depending on `discount_type`.
    #[serde(default)]
    pub discount_value: RawValue,
    /// Whether the promotion is currently offered. Absent means active.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Promotion {
    /// Discount this promotion grants on `amount`, in whole baht.
    ///
    /// The result is never negative and never exceeds `amount`. Inactive
    /// promotions grant nothing.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn discount_for(&self, amount: i64) -> i64 {
        if !self.active || amount <= 0 {
            return 0;
        }

        let value: f64 = parse_raw(&self.discount_value).max(0.0);
        let discount: i64 = match self.discount_type {
            DiscountType::Percent => round_money(amount as f64 * value.min(100.0) / 100.0),
            DiscountType::Amount => round_money(value),
        };

        discount.clamp(0, amount)
    }
}

/// One day of availability as returned by `/public/availability_v2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    /// The calendar day.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Slots in time order.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}
