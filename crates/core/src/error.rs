// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aircare_domain::DomainError;

/// Errors that can occur while loading calendar data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value from the booking API violated a domain rule.
    DomainViolation(DomainError),
    /// The availability source could not provide a day.
    SourceUnavailable {
        /// The requested day.
        date: time::Date,
        /// Why the source failed.
        reason: String,
    },
    /// The requested calendar window is out of range.
    InvalidWindow {
        /// Number of days requested.
        days: u16,
        /// Largest accepted window.
        max: u16,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SourceUnavailable { date, reason } => {
                write!(f, "Availability for {date} unavailable: {reason}")
            }
            Self::InvalidWindow { days, max } => {
                write!(f, "Invalid calendar window: {days} days. Must be between 1 and {max}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
