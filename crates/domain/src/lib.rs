// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod btu;
mod error;
mod number;
mod pricing;
mod quote;
mod quote_text;
mod records;
mod slots;

#[cfg(test)]
mod tests;

pub use btu::{BTU_CATALOG, BTU_INPUT_MAX, normalize_btu};
pub use error::DomainError;
pub use number::{
    NumberBounds, RawValue, format_money, format_number, normalize_number, parse_raw, round_money,
    round_to,
};
pub use pricing::{LaborBand, MeterRates, resolve_labor_band, resolve_meter_rates};
pub use quote::{
    ExtraLine, Extras, GrilleSize, LENGTH_BOUNDS, MACHINE_COUNT_BOUNDS, Material, QuoteBreakdown,
    QuoteInput, QuoteMeta, ScaffoldTier, SiphonPump, SpecialLine, SpecialTask, Specials, Totals,
    Unit, calculate_quote,
};
pub use quote_text::format_quote_as_text;
pub use records::{AvailabilityDay, DiscountType, Job, JobStatus, Promotion, Technician};
pub use slots::{
    FreeRange, TimeSlot, format_date, hhmm, iso_date, merge_available_ranges, parse_date,
    parse_time,
};
