use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

use crate::data::field_value::looks_like_date;
use crate::domain::appointment::{Appointment, AppointmentStatus, Priority, VisitType};
use crate::domain::patient::Patient;

/// Load appointments from a JSON array in the portal's record shape.
pub fn load_appointments_json<P: AsRef<Path>>(path: P) -> Result<Vec<Appointment>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let appointments: Vec<Appointment> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse appointments from {}", path.display()))?;

    for appt in &appointments {
        warn_on_bad_dates(&appt.id, &[("date", &appt.date), ("bookedAt", &appt.booked_at)]);
    }

    info!(
        "Loaded {} appointments from {}",
        appointments.len(),
        path.display()
    );
    Ok(appointments)
}

/// Load patients from a JSON array in the portal's record shape.
pub fn load_patients_json<P: AsRef<Path>>(path: P) -> Result<Vec<Patient>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let patients: Vec<Patient> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse patients from {}", path.display()))?;

    for patient in &patients {
        warn_on_bad_dates(&patient.id, &[("lastVisit", &patient.last_visit)]);
    }

    info!("Loaded {} patients from {}", patients.len(), path.display());
    Ok(patients)
}

/// One appointment row as the flat CSV export writes it. List-valued
/// columns are semicolon-separated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentCsvRow {
    id: String,
    patient_id: String,
    patient_name: String,
    patient_age: u32,
    patient_gender: String,
    patient_phone: String,
    date: String,
    time: String,
    token: String,
    status: AppointmentStatus,
    reason: String,
    priority: Priority,
    duration: String,
    #[serde(rename = "type")]
    visit_type: VisitType,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    symptoms: String,
    #[serde(default)]
    lab_reports: String,
    previous_visits: u32,
    insurance: String,
    booked_at: String,
}

impl AppointmentCsvRow {
    fn into_appointment(self) -> Appointment {
        Appointment {
            id: self.id,
            patient_id: self.patient_id,
            patient_name: self.patient_name,
            patient_age: self.patient_age,
            patient_gender: self.patient_gender,
            patient_phone: self.patient_phone,
            date: self.date,
            time: self.time,
            token: self.token,
            status: self.status,
            reason: self.reason,
            priority: self.priority,
            duration: self.duration,
            visit_type: self.visit_type,
            notes: self.notes.filter(|n| !n.is_empty()),
            symptoms: split_list(&self.symptoms),
            lab_reports: split_list(&self.lab_reports),
            previous_visits: self.previous_visits,
            insurance: self.insurance,
            booked_at: self.booked_at,
        }
    }
}

/// Load appointments from a CSV export.
pub fn load_appointments_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Appointment>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut appointments = Vec::new();
    for record in reader.deserialize() {
        let row: AppointmentCsvRow =
            record.with_context(|| format!("Bad appointment row in {}", path.display()))?;
        let appt = row.into_appointment();
        warn_on_bad_dates(&appt.id, &[("date", &appt.date), ("bookedAt", &appt.booked_at)]);
        appointments.push(appt);
    }

    info!(
        "Loaded {} appointments from {}",
        appointments.len(),
        path.display()
    );
    Ok(appointments)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Malformed dates still load; the sort stage treats them as the
/// minimum value. The warning is so bad exports get noticed.
fn warn_on_bad_dates(record_id: &str, fields: &[(&str, &str)]) {
    for (name, value) in fields {
        if !value.is_empty() && !looks_like_date(value) {
            warn!("Record {}: {} '{}' is not YYYY-MM-DD", record_id, name, value);
        }
    }
}
