// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Installation tariff tables.
//!
//! All prices are whole baht. Both resolvers are step functions of the
//! normalized capacity and hold no state.
//!
//! ## Labor bands
//!
//! ```text
//! btu <= 13,000          3,500 - 4,000   (standard 3,750)
//! 13,001 ..= 29,999      4,500 - 6,500   (standard 5,500)
//! btu >= 30,000          7,000 - 8,000   (standard 7,500)
//! ```
//!
//! The published tariff leaves 13,001-15,000 and 24,001-29,999 unassigned;
//! those capacities fall into the enclosing middle band.

use serde::{Deserialize, Serialize};

/// Refrigerant line included in the base price, in meters.
pub const INCLUDED_REFRIGERANT_M: f64 = 4.0;
/// Power cable included in the base price, in meters.
pub const INCLUDED_POWER_M: f64 = 8.0;
/// Drain pipe included in the base price, in meters.
pub const INCLUDED_DRAIN_M: f64 = 8.0;
/// Trunking cover included in the base price, in meters.
pub const INCLUDED_TRUNKING_M: f64 = 4.0;

/// Drain overage has no tariff yet and is never charged.
pub const DRAIN_PER_METER: i64 = 0;
/// Trunking cover overage, per meter.
pub const TRUNKING_PER_METER: i64 = 150;

/// Chasing pipework into a wall, per meter.
pub const WALL_CHASE_PER_METER: i64 = 400;
/// Routing pipework above a ceiling, per meter.
pub const CEILING_RUN_PER_METER: i64 = 250;
/// Thick insulation upgrade on ceiling runs, per meter.
pub const THICK_INSULATION_PER_METER: i64 = 120;
/// Miscellaneous fittings, per piece.
pub const MISC_PART_EACH: i64 = 150;
/// Cable tray, per meter.
pub const WIRE_TRAY_PER_METER: i64 = 200;
/// PVC conduit, per meter.
pub const PVC_PER_METER: i64 = 100;

/// Siphon pump price for units up to [`SIPHON_SMALL_MAX_BTU`].
pub const SIPHON_PUMP_SMALL: i64 = 2_500;
/// Siphon pump price for larger units.
pub const SIPHON_PUMP_LARGE: i64 = 4_000;
/// Largest capacity that takes the small siphon pump.
pub const SIPHON_SMALL_MAX_BTU: u32 = 24_000;

/// A labor price band for one installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborBand {
    /// Human-readable band label.
    pub label: String,
    /// Representative price used in totals.
    pub standard: i64,
    /// Lower end of the band.
    pub min: i64,
    /// Upper end of the band.
    pub max: i64,
}

/// Per-meter material rates for a capacity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterRates {
    /// Upper capacity bound of the tier these rates belong to.
    pub tier_max_btu: u32,
    /// Refrigerant line, per meter.
    pub refrigerant_per_meter: i64,
    /// Power cable, per meter.
    pub power_per_meter: i64,
}

const SMALL_BAND_MAX_BTU: u32 = 13_000;
const LARGE_BAND_MIN_BTU: u32 = 30_000;

/// Ascending by `tier_max_btu`.
const METER_RATE_TABLE: [MeterRates; 7] = [
    MeterRates {
        tier_max_btu: 16_000,
        refrigerant_per_meter: 500,
        power_per_meter: 80,
    },
    MeterRates {
        tier_max_btu: 24_000,
        refrigerant_per_meter: 600,
        power_per_meter: 100,
    },
    MeterRates {
        tier_max_btu: 40_000,
        refrigerant_per_meter: 750,
        power_per_meter: 120,
    },
    MeterRates {
        tier_max_btu: 60_000,
        refrigerant_per_meter: 900,
        power_per_meter: 150,
    },
    MeterRates {
        tier_max_btu: 100_000,
        refrigerant_per_meter: 1_100,
        power_per_meter: 180,
    },
    MeterRates {
        tier_max_btu: 160_000,
        refrigerant_per_meter: 1_300,
        power_per_meter: 220,
    },
    MeterRates {
        tier_max_btu: 200_000,
        refrigerant_per_meter: 1_500,
        power_per_meter: 250,
    },
];

/// Resolves the labor band for a normalized capacity.
#[must_use]
pub fn resolve_labor_band(btu: u32) -> LaborBand {
    if btu <= SMALL_BAND_MAX_BTU {
        LaborBand {
            label: String::from("ไม่เกิน 13,000 BTU"),
            standard: 3_750,
            min: 3_500,
            max: 4_000,
        }
    } else if btu < LARGE_BAND_MIN_BTU {
        LaborBand {
            label: String::from("13,001 - 29,999 BTU"),
            standard: 5_500,
            min: 4_500,
            max: 6_500,
        }
    } else {
        LaborBand {
            label: String::from("30,000 BTU ขึ้นไป"),
            standard: 7_500,
            min: 7_000,
            max: 8_000,
        }
    }
}

/// Resolves per-meter material rates for a normalized capacity.
///
/// Capacities above the table reuse the last tier.
#[must_use]
pub fn resolve_meter_rates(btu: u32) -> MeterRates {
    let last: MeterRates = METER_RATE_TABLE[METER_RATE_TABLE.len() - 1];
    METER_RATE_TABLE
        .iter()
        .copied()
        .find(|tier| btu <= tier.tier_max_btu)
        .unwrap_or(last)
}

/// Siphon pump price for a normalized capacity.
#[must_use]
pub const fn siphon_pump_price(btu: u32) -> i64 {
    if btu <= SIPHON_SMALL_MAX_BTU {
        SIPHON_PUMP_SMALL
    } else {
        SIPHON_PUMP_LARGE
    }
}
