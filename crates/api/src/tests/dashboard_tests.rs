// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aircare_domain::{Job, JobStatus, Technician};

use crate::{ApiError, DashboardSummaryResponse, dashboard_summary};

use super::helpers::{
    create_test_admin, create_test_job, create_test_technician, create_test_technician_record,
};

fn create_jobs() -> Vec<Job> {
    vec![
        create_test_job(1, JobStatus::Pending, None, Some("2026-03-05T10:00:00")),
        create_test_job(2, JobStatus::Assigned, Some("somchai"), Some("2026-03-04T09:00:00")),
        create_test_job(3, JobStatus::Completed, Some("somchai"), None),
        create_test_job(4, JobStatus::Returned, None, Some("2026-03-02T13:00:00")),
        create_test_job(5, JobStatus::Pending, None, None),
        create_test_job(6, JobStatus::Unknown, None, None),
    ]
}

#[test]
fn test_summary_counts_jobs() {
    let technicians: Vec<Technician> = vec![
        create_test_technician_record("somchai", true),
        create_test_technician_record("anan", false),
    ];

    let summary: DashboardSummaryResponse =
        dashboard_summary(&create_jobs(), &technicians, &create_test_admin()).unwrap();

    assert_eq!(summary.total_jobs, 6);
    assert_eq!(summary.open_jobs, 4);
    assert_eq!(summary.active_technicians, 1);

    let pending = summary
        .by_status
        .iter()
        .find(|entry| entry.status == JobStatus::Pending)
        .unwrap();
    assert_eq!(pending.count, 2);
    assert!(
        summary
            .by_status
            .iter()
            .all(|entry| entry.status != JobStatus::Cancelled)
    );
}

#[test]
fn test_unassigned_queue_is_ordered_by_appointment() {
    let summary: DashboardSummaryResponse =
        dashboard_summary(&create_jobs(), &[], &create_test_admin()).unwrap();

    let ids: Vec<i64> = summary.unassigned.iter().map(|entry| entry.job_id).collect();
    assert_eq!(ids, vec![4, 1, 5]);
    assert_eq!(summary.unassigned[0].booking_code, "AC0004");
}

#[test]
fn test_summary_rejects_technician() {
    let err: ApiError = dashboard_summary(&[], &[], &create_test_technician()).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
