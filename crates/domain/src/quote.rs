// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Installation quote calculation.
//!
//! A quote is computed fresh from a [`QuoteInput`] every time. The calculator
//! is total: every field is normalized through [`normalize_number`] first, so
//! missing or malformed input silently becomes a default value.
//!
//! ## Rounding
//!
//! Every monetary amount is rounded to whole baht at the point it is computed
//! (each overage line, each special line) and totals are sums of those rounded
//! amounts. Deferring rounding to the totals would change results.

use crate::btu::{BTU_INPUT_MAX, normalize_btu};
use crate::error::DomainError;
use crate::number::{NumberBounds, RawValue, normalize_number, parse_raw, round_money, round_to};
use crate::pricing::{
    CEILING_RUN_PER_METER, DRAIN_PER_METER, INCLUDED_DRAIN_M, INCLUDED_POWER_M,
    INCLUDED_REFRIGERANT_M, INCLUDED_TRUNKING_M, LaborBand, MISC_PART_EACH, MeterRates,
    PVC_PER_METER, THICK_INSULATION_PER_METER, TRUNKING_PER_METER, WALL_CHASE_PER_METER,
    WIRE_TRAY_PER_METER, resolve_labor_band, resolve_meter_rates, siphon_pump_price,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bounds for the number of identical units on one quote.
pub const MACHINE_COUNT_BOUNDS: NumberBounds = NumberBounds::new(1.0, 50.0, 0);
/// Bounds for measured run lengths, in meters.
pub const LENGTH_BOUNDS: NumberBounds = NumberBounds::new(0.0, 200.0, 1);
/// Bounds for metered special tasks.
pub const SPECIAL_METER_BOUNDS: NumberBounds = NumberBounds::new(0.0, 200.0, 1);
/// Bounds for counted special tasks.
pub const SPECIAL_COUNT_BOUNDS: NumberBounds = NumberBounds::new(0.0, 100.0, 0);

/// Scaffold required to reach the indoor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldTier {
    /// No scaffold.
    #[default]
    None,
    /// Working height up to 4 meters.
    #[serde(rename = "up_to_4m")]
    UpTo4m,
    /// Working height up to 6 meters.
    #[serde(rename = "up_to_6m")]
    UpTo6m,
}

impl ScaffoldTier {
    /// Flat price for this tier.
    #[must_use]
    pub const fn price(self) -> i64 {
        match self {
            Self::None => 0,
            Self::UpTo4m => 1_000,
            Self::UpTo6m => 2_000,
        }
    }

    /// Display label for this tier.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "ไม่ใช้",
            Self::UpTo4m => "นั่งร้านสูงไม่เกิน 4 เมตร",
            Self::UpTo6m => "นั่งร้านสูงไม่เกิน 6 เมตร",
        }
    }
}

impl FromStr for ScaffoldTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "up_to_4m" | "4m" => Ok(Self::UpTo4m),
            "up_to_6m" | "6m" => Ok(Self::UpTo6m),
            _ => Err(DomainError::UnknownSelector {
                field: "scaffold",
                value: s.to_string(),
            }),
        }
    }
}

/// Replacement grille size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrilleSize {
    /// No grille work.
    #[default]
    None,
    /// Small grille.
    Small,
    /// Large grille.
    Large,
}

impl GrilleSize {
    /// Flat price for this size.
    #[must_use]
    pub const fn price(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Small => 600,
            Self::Large => 1_200,
        }
    }

    /// Display label for this size.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "ไม่ใช้",
            Self::Small => "หน้ากากลมขนาดเล็ก",
            Self::Large => "หน้ากากลมขนาดใหญ่",
        }
    }
}

impl FromStr for GrilleSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            _ => Err(DomainError::UnknownSelector {
                field: "grille",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a condensate siphon pump is fitted.
///
/// The price depends on capacity only, see [`siphon_pump_price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SiphonPump {
    /// No pump.
    #[default]
    None,
    /// Pump installed.
    Install,
}

impl FromStr for SiphonPump {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "install" | "yes" => Ok(Self::Install),
            _ => Err(DomainError::UnknownSelector {
                field: "siphon_pump",
                value: s.to_string(),
            }),
        }
    }
}

/// Raw quote form contents.
///
/// Numeric fields are kept raw; [`calculate_quote`] normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuoteInput {
    /// Number of identical units (1..=50).
    pub machine_count: RawValue,
    /// Unit type label, e.g. "wall type".
    pub ac_type: String,
    /// Cooling capacity in BTU (0..=200,000).
    pub btu: RawValue,
    /// Refrigerant line length, meters.
    pub len_ref: RawValue,
    /// Power cable length, meters.
    pub len_power: RawValue,
    /// Drain pipe length, meters.
    pub len_drain: RawValue,
    /// Trunking cover length, meters.
    pub len_trunk: RawValue,
    /// Wall chasing, meters.
    pub wall_chase_m: RawValue,
    /// Ceiling routing, meters.
    pub ceiling_run_m: RawValue,
    /// Thick insulation upgrade, meters. Only counts with a ceiling run.
    pub thick_insulation_m: RawValue,
    /// Miscellaneous fittings, pieces.
    pub misc_parts: RawValue,
    /// Cable tray, meters.
    pub wire_tray_m: RawValue,
    /// PVC conduit, meters.
    pub pvc_m: RawValue,
    /// Scaffold tier.
    pub scaffold: ScaffoldTier,
    /// Grille size.
    pub grille: GrilleSize,
    /// Siphon pump.
    pub siphon_pump: SiphonPump,
}

/// Normalized inputs and the tariff tier they resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteMeta {
    /// Number of identical units.
    pub machine_count: u32,
    /// Unit type label.
    pub ac_type: String,
    /// Catalog capacity.
    pub btu: u32,
    /// Refrigerant line length, meters.
    pub len_ref: f64,
    /// Power cable length, meters.
    pub len_power: f64,
    /// Drain pipe length, meters.
    pub len_drain: f64,
    /// Trunking cover length, meters.
    pub len_trunk: f64,
    /// Per-meter material rates.
    pub rates: MeterRates,
}

/// A standard material included in the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Refrigerant line.
    Refrigerant,
    /// Power cable.
    Power,
    /// Drain pipe.
    Drain,
    /// Trunking cover.
    Trunking,
}

impl Material {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Refrigerant => "ท่อน้ำยา",
            Self::Power => "สายไฟ",
            Self::Drain => "ท่อน้ำทิ้ง",
            Self::Trunking => "รางครอบท่อ",
        }
    }

    /// Length included in the base price, meters.
    #[must_use]
    pub const fn included_m(self) -> f64 {
        match self {
            Self::Refrigerant => INCLUDED_REFRIGERANT_M,
            Self::Power => INCLUDED_POWER_M,
            Self::Drain => INCLUDED_DRAIN_M,
            Self::Trunking => INCLUDED_TRUNKING_M,
        }
    }
}

/// Overage on one standard material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraLine {
    /// The material.
    pub material: Material,
    /// Length included in the base price.
    pub included_m: f64,
    /// Length measured on site.
    pub supplied_m: f64,
    /// Length beyond the included allowance.
    pub extra_m: f64,
    /// Price per extra meter.
    pub rate_per_meter: i64,
    /// Rounded cost of the overage.
    pub cost: i64,
    /// Remark shown next to the line, if any.
    pub note: Option<String>,
}

/// Overage on the four standard materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    /// Refrigerant line overage.
    pub refrigerant: ExtraLine,
    /// Power cable overage.
    pub power: ExtraLine,
    /// Drain pipe overage (never charged).
    pub drain: ExtraLine,
    /// Trunking cover overage.
    pub trunking: ExtraLine,
    /// Sum of the four line costs.
    pub total: i64,
}

impl Extras {
    /// Lines in display order.
    #[must_use]
    pub const fn lines(&self) -> [&ExtraLine; 4] {
        [&self.refrigerant, &self.power, &self.drain, &self.trunking]
    }
}

/// An optional on-site task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialTask {
    /// Wall chasing.
    WallChase,
    /// Ceiling routing.
    CeilingRun,
    /// Thick insulation upgrade.
    ThickInsulation,
    /// Miscellaneous fittings.
    MiscParts,
    /// Cable tray.
    WireTray,
    /// PVC conduit.
    Pvc,
    /// Scaffold.
    Scaffold,
    /// Grille replacement.
    Grille,
    /// Siphon pump.
    SiphonPump,
}

/// Billing unit of a special task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Priced per meter.
    Meter,
    /// Priced per piece.
    Piece,
    /// Flat fee.
    Job,
}

impl Unit {
    /// Display suffix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Meter => "เมตร",
            Self::Piece => "ชิ้น",
            Self::Job => "งาน",
        }
    }
}

/// A priced special task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialLine {
    /// The task.
    pub task: SpecialTask,
    /// Display label.
    pub label: String,
    /// Quantity in `unit`.
    pub quantity: f64,
    /// Billing unit.
    pub unit: Unit,
    /// Price per unit.
    pub unit_price: i64,
    /// Rounded line cost.
    pub cost: i64,
}

/// All special task lines on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Specials {
    /// Lines in calculation order. Tasks not requested are omitted.
    pub lines: Vec<SpecialLine>,
    /// Sum of the line costs.
    pub total: i64,
}

/// Quote totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Price of one installation.
    pub per_machine: i64,
    /// `per_machine * machine_count`.
    pub grand: i64,
}

/// A complete, immutable quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Normalized inputs.
    pub meta: QuoteMeta,
    /// Labor band.
    pub base_labor: LaborBand,
    /// Standard material overage.
    pub extras: Extras,
    /// Special tasks.
    pub specials: Specials,
    /// Totals.
    pub totals: Totals,
}

/// Calculates a quote.
///
/// # Steps
///
/// 1. Normalize the unit count (1..=50) and capacity; resolve labor band and
///    meter rates.
/// 2. Price overage on refrigerant (4 m), power (8 m), drain (8 m) and
///    trunking (4 m). Drain overage is always 0.
/// 3. Price requested special tasks. Thick insulation only applies when a
///    ceiling run is present.
/// 4. `per_machine = labor.standard + extras + specials`,
///    `grand = per_machine * machine_count`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calculate_quote(input: &QuoteInput) -> QuoteBreakdown {
    // Safe cast: clamped to 1..=50
    let machine_count: u32 = normalize_number(&input.machine_count, MACHINE_COUNT_BOUNDS) as u32;
    // Capacity is floored, never rounded, so 24,000.6 stays in the 24,000 tier.
    let capacity: f64 = parse_raw(&input.btu)
        .floor()
        .clamp(0.0, f64::from(BTU_INPUT_MAX));
    let btu: u32 = normalize_btu(&RawValue::Number(capacity));

    let base_labor: LaborBand = resolve_labor_band(btu);
    let rates: MeterRates = resolve_meter_rates(btu);

    let len_ref: f64 = normalize_number(&input.len_ref, LENGTH_BOUNDS);
    let len_power: f64 = normalize_number(&input.len_power, LENGTH_BOUNDS);
    let len_drain: f64 = normalize_number(&input.len_drain, LENGTH_BOUNDS);
    let len_trunk: f64 = normalize_number(&input.len_trunk, LENGTH_BOUNDS);

    let extras: Extras = price_extras(&rates, len_ref, len_power, len_drain, len_trunk);
    let specials: Specials = price_specials(input, btu);

    let per_machine: i64 = base_labor.standard + extras.total + specials.total;
    let grand: i64 = per_machine * i64::from(machine_count);

    QuoteBreakdown {
        meta: QuoteMeta {
            machine_count,
            ac_type: input.ac_type.trim().to_string(),
            btu,
            len_ref,
            len_power,
            len_drain,
            len_trunk,
            rates,
        },
        base_labor,
        extras,
        specials,
        totals: Totals { per_machine, grand },
    }
}

fn extra_line(material: Material, supplied_m: f64, rate_per_meter: i64) -> ExtraLine {
    let included_m: f64 = material.included_m();
    let extra_m: f64 = round_to((supplied_m - included_m).max(0.0), LENGTH_BOUNDS.decimals);

    #[allow(clippy::cast_precision_loss)]
    let cost: i64 = round_money(extra_m * rate_per_meter as f64);

    let note: Option<String> = match material {
        Material::Drain if extra_m > 0.0 => Some(String::from("ยังไม่มีอัตราค่าบริการ")),
        _ => None,
    };

    ExtraLine {
        material,
        included_m,
        supplied_m,
        extra_m,
        rate_per_meter,
        cost,
        note,
    }
}

fn price_extras(
    rates: &MeterRates,
    len_ref: f64,
    len_power: f64,
    len_drain: f64,
    len_trunk: f64,
) -> Extras {
    let refrigerant = extra_line(Material::Refrigerant, len_ref, rates.refrigerant_per_meter);
    let power = extra_line(Material::Power, len_power, rates.power_per_meter);
    let drain = extra_line(Material::Drain, len_drain, DRAIN_PER_METER);
    let trunking = extra_line(Material::Trunking, len_trunk, TRUNKING_PER_METER);

    let total: i64 = refrigerant.cost + power.cost + drain.cost + trunking.cost;

    Extras {
        refrigerant,
        power,
        drain,
        trunking,
        total,
    }
}

fn metered_line(
    task: SpecialTask,
    label: &str,
    quantity: f64,
    unit: Unit,
    unit_price: i64,
) -> Option<SpecialLine> {
    if quantity <= 0.0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let cost: i64 = round_money(quantity * unit_price as f64);

    Some(SpecialLine {
        task,
        label: label.to_string(),
        quantity,
        unit,
        unit_price,
        cost,
    })
}

fn flat_line(task: SpecialTask, label: &str, price: i64) -> SpecialLine {
    SpecialLine {
        task,
        label: label.to_string(),
        quantity: 1.0,
        unit: Unit::Job,
        unit_price: price,
        cost: price,
    }
}

fn price_specials(input: &QuoteInput, btu: u32) -> Specials {
    let wall_chase: f64 = normalize_number(&input.wall_chase_m, SPECIAL_METER_BOUNDS);
    let ceiling_run: f64 = normalize_number(&input.ceiling_run_m, SPECIAL_METER_BOUNDS);
    let thick_insulation: f64 = if ceiling_run > 0.0 {
        normalize_number(&input.thick_insulation_m, SPECIAL_METER_BOUNDS)
    } else {
        0.0
    };
    let misc_parts: f64 = normalize_number(&input.misc_parts, SPECIAL_COUNT_BOUNDS);
    let wire_tray: f64 = normalize_number(&input.wire_tray_m, SPECIAL_METER_BOUNDS);
    let pvc: f64 = normalize_number(&input.pvc_m, SPECIAL_METER_BOUNDS);

    let mut lines: Vec<SpecialLine> = [
        metered_line(
            SpecialTask::WallChase,
            "สกัดผนังฝังท่อ",
            wall_chase,
            Unit::Meter,
            WALL_CHASE_PER_METER,
        ),
        metered_line(
            SpecialTask::CeilingRun,
            "เดินท่อในฝ้าเพดาน",
            ceiling_run,
            Unit::Meter,
            CEILING_RUN_PER_METER,
        ),
        metered_line(
            SpecialTask::ThickInsulation,
            "เปลี่ยนฉนวนหุ้มท่อแบบหนา",
            thick_insulation,
            Unit::Meter,
            THICK_INSULATION_PER_METER,
        ),
        metered_line(
            SpecialTask::MiscParts,
            "อุปกรณ์เบ็ดเตล็ด",
            misc_parts,
            Unit::Piece,
            MISC_PART_EACH,
        ),
        metered_line(
            SpecialTask::WireTray,
            "รางเดินสายไฟ",
            wire_tray,
            Unit::Meter,
            WIRE_TRAY_PER_METER,
        ),
        metered_line(
            SpecialTask::Pvc,
            "ท่อร้อยสาย PVC",
            pvc,
            Unit::Meter,
            PVC_PER_METER,
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    if input.scaffold != ScaffoldTier::None {
        lines.push(flat_line(
            SpecialTask::Scaffold,
            input.scaffold.label(),
            input.scaffold.price(),
        ));
    }

    if input.grille != GrilleSize::None {
        lines.push(flat_line(
            SpecialTask::Grille,
            input.grille.label(),
            input.grille.price(),
        ));
    }

    if input.siphon_pump == SiphonPump::Install {
        lines.push(flat_line(
            SpecialTask::SiphonPump,
            "ปั๊มเดรนน้ำทิ้ง (กาลักน้ำ)",
            siphon_pump_price(btu),
        ));
    }

    let total: i64 = lines.iter().map(|line| line.cost).sum();

    Specials { lines, total }
}
