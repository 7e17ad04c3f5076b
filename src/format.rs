//! Display-only formatting: badge labels and friendly dates.
//!
//! Pure presentation mapping, deliberately outside the query pipeline.

use chrono::NaiveDate;

use crate::domain::appointment::{AppointmentStatus, Priority, VisitType};
use crate::domain::patient::PatientStatus;

/// Render a `YYYY-MM-DD` date as e.g. "Sun, Dec 15". Unparseable input
/// comes back unchanged rather than failing a render.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%a, %b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Status badge text: uppercased, dash shown as a space.
pub fn status_label(status: AppointmentStatus) -> String {
    status.as_str().replace('-', " ").to_uppercase()
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
        Priority::Emergency => "Emergency",
    }
}

pub fn visit_type_label(visit_type: VisitType) -> &'static str {
    match visit_type {
        VisitType::New => "New",
        VisitType::FollowUp => "Follow-up",
        VisitType::Review => "Review",
    }
}

pub fn patient_status_label(status: PatientStatus) -> &'static str {
    match status {
        PatientStatus::Active => "Active",
        PatientStatus::Inactive => "Inactive",
        PatientStatus::Regular => "Regular",
    }
}
