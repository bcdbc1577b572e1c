// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while reading external values into domain types.
///
/// Pricing and slot merging are total and never produce these; only parsing
/// at the boundary does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wall-clock time could not be parsed.
    InvalidTime(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A quote selector value is not recognized.
    UnknownSelector {
        /// The selector field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTime(value) => {
                write!(f, "Invalid time '{value}': expected HH:MM or HH:MM:SS")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::UnknownSelector { field, value } => {
                write!(f, "Unknown value '{value}' for {field}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
