// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Numeric input normalization and display formatting.
//!
//! Every numeric field of a quote passes through [`normalize_number`] before
//! any pricing logic sees it. The function is total: it never panics and never
//! returns `NaN` or an infinity.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};

/// A raw numeric value as entered in a form or received in a JSON payload.
///
/// Form inputs arrive as free text (`"1,200"`, `" 4.5 "`, `""`), API clients
/// usually send numbers, and missing fields arrive as `null`. Any other JSON
/// value is accepted and reads as `0`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum RawValue {
    /// A JSON number.
    Number(f64),
    /// Free text typed by an operator.
    Text(String),
    /// No value supplied.
    #[default]
    Empty,
    /// A boolean, array or object.
    Unsupported(IgnoredAny),
}

impl Serialize for RawValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Empty | Self::Unsupported(_) => serializer.serialize_none(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Clamp and precision bounds for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberBounds {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Number of fractional digits kept after rounding.
    pub decimals: u8,
}

impl NumberBounds {
    /// Creates a new set of bounds.
    ///
    /// `min` must not exceed `max`.
    #[must_use]
    pub const fn new(min: f64, max: f64, decimals: u8) -> Self {
        Self { min, max, decimals }
    }
}

/// Parses a raw value into a finite number without clamping or rounding.
///
/// Thousands separators and surrounding whitespace are stripped from text.
/// Anything that does not parse to a finite number yields `0.0`.
#[must_use]
pub fn parse_raw(raw: &RawValue) -> f64 {
    let value: f64 = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                0.0
            } else {
                cleaned.parse::<f64>().unwrap_or(0.0)
            }
        }
        RawValue::Empty | RawValue::Unsupported(_) => 0.0,
    };

    if value.is_finite() { value } else { 0.0 }
}

/// Rounds half-up to the given number of fractional digits.
///
/// Halves round towards positive infinity, so `2.5 -> 3` and `-2.5 -> -2`.
#[must_use]
// A fused multiply-add skips the intermediate rounding and can move exact halves.
#[allow(clippy::suboptimal_flops)]
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor: f64 = 10_f64.powi(i32::from(decimals));
    let rounded: f64 = (value * factor + 0.5).floor() / factor;
    if rounded.is_finite() { rounded } else { 0.0 }
}

/// Rounds a monetary amount half-up to whole baht.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_money(value: f64) -> i64 {
    round_to(value, 0) as i64
}

/// Normalizes a raw value: strip separators, parse, round, then clamp.
///
/// Invalid or empty input is treated as `0` before clamping, so the result is
/// always inside `[bounds.min, bounds.max]`.
///
/// # Example
///
/// ```text
/// normalize_number("1,234.56", {min: 0, max: 2000, decimals: 1}) == 1234.6
/// normalize_number("abc",      {min: 0, max: 10,   decimals: 0}) == 0
/// normalize_number("75",       {min: 1, max: 50,   decimals: 0}) == 50
/// ```
#[must_use]
pub fn normalize_number(raw: &RawValue, bounds: NumberBounds) -> f64 {
    let rounded: f64 = round_to(parse_raw(raw), bounds.decimals);

    if rounded < bounds.min {
        bounds.min
    } else if rounded > bounds.max {
        bounds.max
    } else {
        rounded
    }
}

/// Formats a whole-baht amount with thousands separators (`13500 -> "13,500"`).
#[must_use]
pub fn format_money(amount: i64) -> String {
    let digits: String = amount.unsigned_abs().to_string();
    let grouped: String = group_thousands(&digits);
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a number with thousands separators and at most `max_decimals`
/// fractional digits. Trailing zeros are dropped (`6.0 -> "6"`, `2.50 -> "2.5"`).
#[must_use]
pub fn format_number(value: f64, max_decimals: u8) -> String {
    let rounded: f64 = round_to(value, max_decimals);
    let text: String = format!("{:.*}", usize::from(max_decimals), rounded.abs());

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_trimmed: &str = frac_part.trim_end_matches('0');

    let mut out: String = group_thousands(int_part);
    if !frac_trimmed.is_empty() {
        out.push('.');
        out.push_str(frac_trimmed);
    }

    if rounded < 0.0 && out.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{out}")
    } else {
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len: usize = digits.len();
    let mut out: String = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
