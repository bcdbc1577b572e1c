// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use aircare_domain::{FreeRange, Job, JobStatus, Promotion, QuoteBreakdown, RawValue, TimeSlot};
use serde::{Deserialize, Serialize};

/// API request to price an installation.
///
/// This DTO is distinct from domain types and represents the API contract.
/// Numeric fields accept numbers, numeric strings or nothing. Selector fields
/// are plain strings and are validated before the quote is calculated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    /// Number of identical units.
    pub machine_count: RawValue,
    /// Unit type label.
    pub ac_type: String,
    /// Cooling capacity in BTU.
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
    /// Thick insulation upgrade, meters.
    pub thick_insulation_m: RawValue,
    /// Miscellaneous fittings, pieces.
    pub misc_parts: RawValue,
    /// Cable tray, meters.
    pub wire_tray_m: RawValue,
    /// PVC conduit, meters.
    pub pvc_m: RawValue,
    /// Scaffold tier (`none`, `up_to_4m`, `up_to_6m`).
    pub scaffold: Option<String>,
    /// Grille size (`none`, `small`, `large`).
    pub grille: Option<String>,
    /// Siphon pump (`none`, `install`).
    pub siphon_pump: Option<String>,
    /// Promotion to apply to the grand total.
    pub promotion: Option<Promotion>,
}

/// API response for a priced installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// The full price breakdown.
    pub breakdown: QuoteBreakdown,
    /// The plain-text quotation.
    pub text: String,
    /// Title of the applied promotion, if any.
    pub promotion_title: Option<String>,
    /// Promotion discount on the grand total, in baht.
    pub discount: i64,
    /// Grand total after the discount, in baht.
    pub net_total: i64,
}

/// API request to merge a day's slots into free ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRangesRequest {
    /// Time-ordered slots of one day.
    pub slots: Vec<TimeSlot>,
}

/// API response with merged free ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRangesResponse {
    /// Maximal runs of consecutive available slots.
    pub ranges: Vec<FreeRange>,
}

/// API request to pre-load the booking calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRequest {
    /// First day of the window (`YYYY-MM-DD`).
    pub from: String,
    /// Number of days to load.
    pub days: u16,
}

/// One day of the booking calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDayInfo {
    /// The day (`YYYY-MM-DD`).
    pub date: String,
    /// Merged free ranges.
    pub ranges: Vec<FreeRange>,
    /// Number of slots reported for the day.
    pub slot_count: usize,
    /// Number of slots with at least one free technician.
    pub available_slot_count: usize,
    /// Whether the day could not be loaded.
    pub failed: bool,
}

/// API response for a pre-loaded calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// First day of the window (`YYYY-MM-DD`).
    pub from: String,
    /// Days in calendar order.
    pub days: Vec<CalendarDayInfo>,
    /// Number of days that failed to load.
    pub failed_days: usize,
}

/// Count of jobs in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    /// The status.
    pub status: JobStatus,
    /// Number of jobs in it.
    pub count: usize,
}

/// API response with dashboard aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummaryResponse {
    /// Total number of jobs.
    pub total_jobs: usize,
    /// Jobs that still need work.
    pub open_jobs: usize,
    /// Open jobs with no technician assigned, oldest appointment first.
    pub unassigned: Vec<QueueEntry>,
    /// Per-status counts, only for statuses that occur.
    pub by_status: Vec<StatusCount>,
    /// Number of active technicians.
    pub active_technicians: usize,
}

/// A job waiting for dispatch, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// The job identifier.
    pub job_id: i64,
    /// The booking code.
    pub booking_code: String,
    /// The job status.
    pub status: JobStatus,
    /// Appointment date and time as reported.
    pub appointment_datetime: Option<String>,
}

impl From<&Job> for QueueEntry {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.job_id,
            booking_code: job.booking_code.clone(),
            status: job.status,
            appointment_datetime: job.appointment_datetime.clone(),
        }
    }
}
