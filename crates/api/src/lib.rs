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
    clippy::all
)]

mod auth;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use request_response::{
    CalendarDayInfo, CalendarRequest, CalendarResponse, DashboardSummaryResponse,
    MergeRangesRequest, MergeRangesResponse, QueueEntry, QuoteRequest, QuoteResponse,
    StatusCount,
};

use aircare::{CalendarDay, calendar_dates};
use aircare_domain::{
    FreeRange, GrilleSize, Job, JobStatus, QuoteBreakdown, QuoteInput, ScaffoldTier, SiphonPump,
    Technician, calculate_quote, format_date, format_quote_as_text, merge_available_ranges,
    parse_date,
};
use std::str::FromStr;
use tracing::{debug, info};

/// Parses an optional selector string, treating absence as the default.
fn parse_selector<T>(value: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr<Err = aircare_domain::DomainError> + Default,
{
    value.map_or_else(
        || Ok(T::default()),
        |text| text.parse::<T>().map_err(translate_domain_error),
    )
}

/// Converts a quote request into calculator input.
///
/// # Errors
///
/// Returns an error if a selector names an unknown option.
fn to_quote_input(request: &QuoteRequest) -> Result<QuoteInput, ApiError> {
    Ok(QuoteInput {
        machine_count: request.machine_count.clone(),
        ac_type: request.ac_type.clone(),
        btu: request.btu.clone(),
        len_ref: request.len_ref.clone(),
        len_power: request.len_power.clone(),
        len_drain: request.len_drain.clone(),
        len_trunk: request.len_trunk.clone(),
        wall_chase_m: request.wall_chase_m.clone(),
        ceiling_run_m: request.ceiling_run_m.clone(),
        thick_insulation_m: request.thick_insulation_m.clone(),
        misc_parts: request.misc_parts.clone(),
        wire_tray_m: request.wire_tray_m.clone(),
        pvc_m: request.pvc_m.clone(),
        scaffold: parse_selector::<ScaffoldTier>(request.scaffold.as_deref())?,
        grille: parse_selector::<GrilleSize>(request.grille.as_deref())?,
        siphon_pump: parse_selector::<SiphonPump>(request.siphon_pump.as_deref())?,
    })
}

/// Prices an installation.
///
/// Numeric fields are normalized by the calculator and never fail. If the
/// request carries an active promotion, its discount is taken off the grand
/// total.
///
/// # Arguments
///
/// * `request` - The quote request
///
/// # Returns
///
/// The breakdown, its plain-text rendering and the discounted total.
///
/// # Errors
///
/// Returns an error if a selector field names an unknown option.
pub fn quote(request: &QuoteRequest) -> Result<QuoteResponse, ApiError> {
    let input: QuoteInput = to_quote_input(request)?;
    let breakdown: QuoteBreakdown = calculate_quote(&input);
    let text: String = format_quote_as_text(&breakdown);

    let discount: i64 = request
        .promotion
        .as_ref()
        .map_or(0, |promotion| promotion.discount_for(breakdown.totals.grand));
    let net_total: i64 = breakdown.totals.grand - discount;

    info!(
        machine_count = breakdown.meta.machine_count,
        btu = breakdown.meta.btu,
        grand_total = breakdown.totals.grand,
        discount,
        "Calculated quote"
    );

    Ok(QuoteResponse {
        text,
        promotion_title: request
            .promotion
            .as_ref()
            .filter(|_| discount > 0)
            .map(|promotion| promotion.title.clone()),
        discount,
        net_total,
        breakdown,
    })
}

/// Renders an installation quote as plain text.
///
/// # Errors
///
/// Returns an error if a selector field names an unknown option.
pub fn quote_text(request: &QuoteRequest) -> Result<String, ApiError> {
    let input: QuoteInput = to_quote_input(request)?;
    Ok(format_quote_as_text(&calculate_quote(&input)))
}

/// Merges a day's slots into free ranges.
#[must_use]
pub fn merge_ranges(request: &MergeRangesRequest) -> MergeRangesResponse {
    let ranges: Vec<FreeRange> = merge_available_ranges(&request.slots);
    debug!(
        slots = request.slots.len(),
        ranges = ranges.len(),
        "Merged availability"
    );
    MergeRangesResponse { ranges }
}

/// Validates a calendar request and lists the days to load.
///
/// This function does not contact the booking API. The caller loads the
/// returned days and passes them to [`build_calendar_response`].
///
/// # Arguments
///
/// * `request` - The calendar request
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// The dates of the window in calendar order. The first date is `from`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized to view the calendar
/// - `from` is not a valid `YYYY-MM-DD` date
/// - `days` is 0 or exceeds the pre-load limit
pub fn plan_calendar(
    request: &CalendarRequest,
    actor: &AuthenticatedActor,
) -> Result<Vec<time::Date>, ApiError> {
    AuthorizationService::authorize_view_calendar(actor)?;

    let from: time::Date = parse_date(&request.from).map_err(translate_domain_error)?;
    let dates: Vec<time::Date> = calendar_dates(from, request.days).map_err(translate_core_error)?;

    info!(from = %format_date(from), days = request.days, "Planned calendar pre-load");

    Ok(dates)
}

/// Builds the calendar response from pre-loaded days.
#[must_use]
pub fn build_calendar_response(from: time::Date, days: Vec<CalendarDay>) -> CalendarResponse {
    let days: Vec<CalendarDayInfo> = days
        .into_iter()
        .map(|day| CalendarDayInfo {
            date: format_date(day.date),
            slot_count: day.slots.len(),
            available_slot_count: day.slots.iter().filter(|slot| slot.available).count(),
            failed: day.failed,
            ranges: day.ranges,
        })
        .collect();

    CalendarResponse {
        from: format_date(from),
        failed_days: days.iter().filter(|day| day.failed).count(),
        days,
    }
}

/// Aggregates jobs and technicians for the admin dashboard.
///
/// # Arguments
///
/// * `jobs` - Every job reported by the booking API
/// * `technicians` - Every technician reported by the booking API
/// * `actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if the actor is not authorized to view the dashboard.
pub fn dashboard_summary(
    jobs: &[Job],
    technicians: &[Technician],
    actor: &AuthenticatedActor,
) -> Result<DashboardSummaryResponse, ApiError> {
    AuthorizationService::authorize_view_dashboard(actor)?;

    let mut by_status: Vec<StatusCount> = Vec::new();
    for job in jobs {
        let index: usize = by_status
            .iter()
            .position(|entry| entry.status == job.status)
            .unwrap_or_else(|| {
                by_status.push(StatusCount {
                    status: job.status,
                    count: 0,
                });
                by_status.len() - 1
            });
        by_status[index].count += 1;
    }

    let mut unassigned: Vec<QueueEntry> = jobs
        .iter()
        .filter(|job| job.status.is_open() && job.technician_username.is_none())
        .map(QueueEntry::from)
        .collect();
    // Unscheduled jobs go last.
    unassigned.sort_by(|a, b| {
        match (&a.appointment_datetime, &b.appointment_datetime) {
            (Some(left), Some(right)) => left.cmp(right),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.job_id.cmp(&b.job_id),
        }
    });

    let summary = DashboardSummaryResponse {
        total_jobs: jobs.len(),
        open_jobs: jobs.iter().filter(|job| job.status.is_open()).count(),
        unassigned,
        by_status,
        active_technicians: technicians.iter().filter(|tech| tech.active).count(),
    };

    debug!(
        total_jobs = summary.total_jobs,
        open_jobs = summary.open_jobs,
        unknown_status = jobs
            .iter()
            .filter(|job| job.status == JobStatus::Unknown)
            .count(),
        "Built dashboard summary"
    );

    Ok(summary)
}
