// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use aircare_domain::{DiscountType, Job, JobStatus, Promotion, RawValue, Technician};

use crate::{AuthenticatedActor, QuoteRequest, Role};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-token"), Role::Admin)
}

pub fn create_test_superadmin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("owner-token"), Role::SuperAdmin)
}

pub fn create_test_technician() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("tech-token"), Role::Technician)
}

/// A single 9,000 BTU wall unit with every run at its included length.
pub fn create_test_quote_request() -> QuoteRequest {
    QuoteRequest {
        machine_count: RawValue::from(1),
        ac_type: String::from("แบบติดผนัง"),
        btu: RawValue::from(9_000),
        len_ref: RawValue::from(4),
        len_power: RawValue::from(8),
        len_drain: RawValue::from(8),
        len_trunk: RawValue::from(4),
        ..QuoteRequest::default()
    }
}

pub fn create_test_promotion(discount_type: DiscountType, value: f64) -> Promotion {
    Promotion {
        promo_id: 7,
        title: String::from("ลดต้อนรับหน้าร้อน"),
        discount_type,
        discount_value: RawValue::from(value),
        active: true,
    }
}

pub fn create_test_job(
    job_id: i64,
    status: JobStatus,
    technician: Option<&str>,
    appointment: Option<&str>,
) -> Job {
    Job {
        job_id,
        booking_code: format!("AC{job_id:04}"),
        status,
        job_type: String::from("install"),
        customer_name: String::from("Test Customer"),
        appointment_datetime: appointment.map(String::from),
        technician_username: technician.map(String::from),
    }
}

pub fn create_test_technician_record(username: &str, active: bool) -> Technician {
    Technician {
        technician_id: 1,
        username: username.to_string(),
        full_name: String::from("Test Technician"),
        phone: None,
        active,
    }
}
