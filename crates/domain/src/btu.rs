// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cooling capacity normalization.
//!
//! Customers quote whatever capacity is printed on the box; pricing works on
//! catalog steps. A capacity is always rounded UP to the next step, since a
//! smaller unit than requested is never offered.

use crate::number::{RawValue, parse_raw};

/// Ascending catalog of standard unit capacities, in BTU.
pub const BTU_CATALOG: [u32; 14] = [
    9_000, 12_000, 18_000, 24_000, 30_000, 36_000, 48_000, 60_000, 72_000, 90_000, 100_000,
    120_000, 160_000, 200_000,
];

/// Largest capacity accepted on a quote form.
pub const BTU_INPUT_MAX: u32 = 200_000;

/// Step used above the top of the catalog.
const OVERSIZE_STEP: f64 = 10_000.0;

/// Ceiling for absurd inputs so the result always fits in a `u32`.
/// It is itself a multiple of [`OVERSIZE_STEP`].
const RAW_CEILING: f64 = 4_000_000_000.0;

/// Normalizes a raw capacity to a catalog step.
///
/// - `0`, negative or unparseable input maps to `0` (no unit selected)
/// - fractional input is floored
/// - otherwise the smallest catalog value `>=` the input is returned
/// - above the catalog the input is rounded up to the next multiple of 10,000
///
/// The result is a fixed point: normalizing an already normalized value
/// returns it unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize_btu(raw: &RawValue) -> u32 {
    let floored: f64 = parse_raw(raw).floor().min(RAW_CEILING);
    if floored <= 0.0 {
        return 0;
    }

    // Safe cast: 0 < floored <= RAW_CEILING < u32::MAX
    let value: u32 = floored as u32;

    if let Some(step) = BTU_CATALOG.iter().copied().find(|step| *step >= value) {
        return step;
    }

    // Safe cast: ceil of a value <= RAW_CEILING stays <= RAW_CEILING
    ((floored / OVERSIZE_STEP).ceil() * OVERSIZE_STEP) as u32
}
