use anyhow::{anyhow, Result};
use chrono::Local;
use tracing::info;

use crate::domain::patient::{ConsultationNote, Medication, Patient, Prescription};

/// Form input for a new consultation note. Symptoms arrive as one
/// comma-separated string, as the note form collects them.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub symptoms: String,
    pub diagnosis: String,
    pub notes: String,
    pub follow_up_date: Option<String>,
}

/// Form input for a new prescription.
#[derive(Debug, Clone, Default)]
pub struct NewPrescription {
    pub medications: Vec<Medication>,
    pub instructions: String,
    pub valid_until: String,
}

/// The doctor's patient roster: owns the patient collection and applies
/// the console's local mutations to it.
#[derive(Debug, Clone)]
pub struct PatientRoster {
    doctor: String,
    patients: Vec<Patient>,
}

impl PatientRoster {
    pub fn new(doctor: impl Into<String>, patients: Vec<Patient>) -> Self {
        Self {
            doctor: doctor.into(),
            patients,
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn find(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == patient_id)
    }

    /// Record a consultation note against a patient. Symptoms are split
    /// on commas, trimmed, and empty entries dropped. Returns the new
    /// note id.
    pub fn add_note(&mut self, patient_id: &str, note: NewNote) -> Result<String> {
        let today = today_stamp();
        let doctor = self.doctor.clone();
        let patient = self.find_mut(patient_id)?;

        let id = format!("CN-{}", patient.consultation_notes.len() + 1);
        let symptoms: Vec<String> = note
            .symptoms
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        patient.consultation_notes.push(ConsultationNote {
            id: id.clone(),
            date: today,
            doctor,
            notes: note.notes,
            symptoms,
            diagnosis: note.diagnosis,
            follow_up_date: note.follow_up_date.filter(|d| !d.is_empty()),
        });

        info!("roster: added note {} for patient {}", id, patient_id);
        Ok(id)
    }

    /// Record a prescription against a patient. Medication rows with a
    /// blank name are dropped. Returns the new prescription id.
    pub fn add_prescription(
        &mut self,
        patient_id: &str,
        prescription: NewPrescription,
    ) -> Result<String> {
        let today = today_stamp();
        let patient = self.find_mut(patient_id)?;

        let id = format!("RX-{}", patient.prescriptions.len() + 1);
        let medications: Vec<Medication> = prescription
            .medications
            .into_iter()
            .filter(|m| !m.name.trim().is_empty())
            .collect();

        patient.prescriptions.push(Prescription {
            id: id.clone(),
            date: today,
            medications,
            instructions: prescription.instructions,
            valid_until: prescription.valid_until,
        });

        info!(
            "roster: added prescription {} for patient {}",
            id, patient_id
        );
        Ok(id)
    }

    fn find_mut(&mut self, patient_id: &str) -> Result<&mut Patient> {
        self.patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| anyhow!("Patient '{}' not found", patient_id))
    }
}

fn today_stamp() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
