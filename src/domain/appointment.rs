use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::data::field_value::FieldValue;
use crate::data::record::Queryable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Emergency,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Emergency => "emergency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitType {
    New,
    FollowUp,
    Review,
}

impl VisitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::New => "new",
            VisitType::FollowUp => "follow-up",
            VisitType::Review => "review",
        }
    }
}

/// One appointment on the doctor's book.
///
/// Dates are `YYYY-MM-DD` strings and `time` is a 12-hour clock string,
/// matching the portal's record JSON; the sort accessors parse them on
/// demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub patient_phone: String,
    pub date: String,
    pub time: String,
    pub token: String,
    pub status: AppointmentStatus,
    pub reason: String,
    pub priority: Priority,
    pub duration: String,
    #[serde(rename = "type")]
    pub visit_type: VisitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub lab_reports: Vec<String>,
    pub previous_visits: u32,
    pub insurance: String,
    pub booked_at: String,
}

impl Queryable for Appointment {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(self.patient_name.as_str()),
            Cow::from(self.token.as_str()),
            Cow::from(self.reason.as_str()),
        ]
    }

    fn search_exact(&self) -> Vec<&str> {
        vec![self.patient_phone.as_str()]
    }

    fn filter_field(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::from(self.status.as_str())),
            "priority" => Some(Cow::from(self.priority.as_str())),
            "type" => Some(Cow::from(self.visit_type.as_str())),
            // Exact calendar-day equality, as the booking form filters
            "date" => Some(Cow::from(self.date.as_str())),
            _ => None,
        }
    }

    fn sort_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "patient_name" => Some(FieldValue::text(self.patient_name.clone())),
            "patient_age" => Some(FieldValue::Integer(self.patient_age as i64)),
            "date" => Some(FieldValue::date(&self.date)),
            "booked_at" => Some(FieldValue::date(&self.booked_at)),
            "time" => Some(FieldValue::clock(&self.time)),
            "token" => Some(FieldValue::text(self.token.clone())),
            "previous_visits" => Some(FieldValue::Integer(self.previous_visits as i64)),
            _ => None,
        }
    }
}

/// Built-in sample book used when no data file is given.
pub fn sample_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "APT-001".to_string(),
            patient_id: "P-001".to_string(),
            patient_name: "John Doe".to_string(),
            patient_age: 45,
            patient_gender: "Male".to_string(),
            patient_phone: "+1 (555) 123-4567".to_string(),
            date: "2024-12-15".to_string(),
            time: "10:30 AM".to_string(),
            token: "TK-001".to_string(),
            status: AppointmentStatus::Confirmed,
            reason: "Routine checkup & blood pressure review".to_string(),
            priority: Priority::Medium,
            duration: "15 mins".to_string(),
            visit_type: VisitType::FollowUp,
            notes: None,
            symptoms: vec!["High BP".to_string(), "Headache".to_string()],
            lab_reports: Vec::new(),
            previous_visits: 3,
            insurance: "Aetna".to_string(),
            booked_at: "2024-12-10".to_string(),
        },
        Appointment {
            id: "APT-002".to_string(),
            patient_id: "P-002".to_string(),
            patient_name: "Emily Carter".to_string(),
            patient_age: 8,
            patient_gender: "Female".to_string(),
            patient_phone: "+1 (555) 234-5678".to_string(),
            date: "2024-12-15".to_string(),
            time: "9:15 AM".to_string(),
            token: "TK-002".to_string(),
            status: AppointmentStatus::Pending,
            reason: "Persistent cough and mild fever".to_string(),
            priority: Priority::High,
            duration: "20 mins".to_string(),
            visit_type: VisitType::New,
            notes: None,
            symptoms: vec!["Cough".to_string(), "Fever".to_string()],
            lab_reports: Vec::new(),
            previous_visits: 0,
            insurance: "Cigna".to_string(),
            booked_at: "2024-12-12".to_string(),
        },
        Appointment {
            id: "APT-003".to_string(),
            patient_id: "P-003".to_string(),
            patient_name: "Robert Miles".to_string(),
            patient_age: 67,
            patient_gender: "Male".to_string(),
            patient_phone: "+1 (555) 345-6789".to_string(),
            date: "2024-12-15".to_string(),
            time: "12:00 PM".to_string(),
            token: "TK-003".to_string(),
            status: AppointmentStatus::Confirmed,
            reason: "Diabetes follow-up, HbA1c results".to_string(),
            priority: Priority::Medium,
            duration: "15 mins".to_string(),
            visit_type: VisitType::FollowUp,
            notes: Some("Bring glucose diary".to_string()),
            symptoms: Vec::new(),
            lab_reports: vec!["HbA1c - Dec 2024".to_string()],
            previous_visits: 11,
            insurance: "Medicare".to_string(),
            booked_at: "2024-12-08".to_string(),
        },
        Appointment {
            id: "APT-004".to_string(),
            patient_id: "P-004".to_string(),
            patient_name: "Priya Sharma".to_string(),
            patient_age: 31,
            patient_gender: "Female".to_string(),
            patient_phone: "+1 (555) 456-7890".to_string(),
            date: "2024-12-16".to_string(),
            time: "2:45 PM".to_string(),
            token: "TK-004".to_string(),
            status: AppointmentStatus::Completed,
            reason: "Migraine review".to_string(),
            priority: Priority::Low,
            duration: "10 mins".to_string(),
            visit_type: VisitType::Review,
            notes: None,
            symptoms: vec!["Migraine".to_string()],
            lab_reports: Vec::new(),
            previous_visits: 2,
            insurance: "United".to_string(),
            booked_at: "2024-12-05".to_string(),
        },
        Appointment {
            id: "APT-005".to_string(),
            patient_id: "P-005".to_string(),
            patient_name: "Tom Baker".to_string(),
            patient_age: 54,
            patient_gender: "Male".to_string(),
            patient_phone: "+1 (555) 567-8901".to_string(),
            date: "2024-12-16".to_string(),
            time: "11:30 AM".to_string(),
            token: "TK-005".to_string(),
            status: AppointmentStatus::Cancelled,
            reason: "Chest pain during exercise".to_string(),
            priority: Priority::Emergency,
            duration: "30 mins".to_string(),
            visit_type: VisitType::New,
            notes: None,
            symptoms: vec!["Chest pain".to_string(), "Shortness of breath".to_string()],
            lab_reports: vec!["ECG - Dec 2024".to_string()],
            previous_visits: 1,
            insurance: "Aetna".to_string(),
            booked_at: "2024-12-14".to_string(),
        },
        Appointment {
            id: "APT-006".to_string(),
            patient_id: "P-006".to_string(),
            patient_name: "Grace Lin".to_string(),
            patient_age: 73,
            patient_gender: "Female".to_string(),
            patient_phone: "+1 (555) 678-9012".to_string(),
            date: "2024-12-17".to_string(),
            time: "8:00 AM".to_string(),
            token: "TK-006".to_string(),
            status: AppointmentStatus::Confirmed,
            reason: "Arthritis pain management".to_string(),
            priority: Priority::Medium,
            duration: "20 mins".to_string(),
            visit_type: VisitType::Review,
            notes: None,
            symptoms: vec!["Joint pain".to_string()],
            lab_reports: Vec::new(),
            previous_visits: 6,
            insurance: "Medicare".to_string(),
            booked_at: "2024-12-11".to_string(),
        },
        Appointment {
            id: "APT-007".to_string(),
            patient_id: "P-007".to_string(),
            patient_name: "Marcus Webb".to_string(),
            patient_age: 22,
            patient_gender: "Male".to_string(),
            patient_phone: "+1 (555) 789-0123".to_string(),
            date: "2024-12-17".to_string(),
            time: "4:15 PM".to_string(),
            token: "TK-007".to_string(),
            status: AppointmentStatus::NoShow,
            reason: "Sports injury, left ankle".to_string(),
            priority: Priority::Low,
            duration: "15 mins".to_string(),
            visit_type: VisitType::New,
            notes: None,
            symptoms: vec!["Swelling".to_string()],
            lab_reports: vec!["X-Ray Ankle - Dec 2024".to_string()],
            previous_visits: 0,
            insurance: "Cigna".to_string(),
            booked_at: "2024-12-13".to_string(),
        },
        Appointment {
            id: "APT-008".to_string(),
            patient_id: "P-001".to_string(),
            patient_name: "John Doe".to_string(),
            patient_age: 45,
            patient_gender: "Male".to_string(),
            patient_phone: "+1 (555) 123-4567".to_string(),
            date: "2024-12-20".to_string(),
            time: "10:00 AM".to_string(),
            token: "TK-008".to_string(),
            status: AppointmentStatus::Pending,
            reason: "Blood pressure re-check".to_string(),
            priority: Priority::Medium,
            duration: "10 mins".to_string(),
            visit_type: VisitType::FollowUp,
            notes: None,
            symptoms: Vec::new(),
            lab_reports: Vec::new(),
            previous_visits: 4,
            insurance: "Aetna".to_string(),
            booked_at: "2024-12-15".to_string(),
        },
    ]
}
