use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::data::field_value::FieldValue;
use crate::data::record::Queryable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Inactive,
    Regular,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
            PatientStatus::Regular => "regular",
        }
    }
}

/// Derived age bucket used as a categorical filter.
///
/// Bracket membership is a range check over the patient's age, not a
/// stored field: child is 12 and under, adult 13 through 60, senior
/// above 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Child,
    Adult,
    Senior,
}

impl AgeBracket {
    pub fn from_age(age: u32) -> Self {
        if age <= 12 {
            AgeBracket::Child
        } else if age <= 60 {
            AgeBracket::Adult
        } else {
            AgeBracket::Senior
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Child => "child",
            AgeBracket::Adult => "adult",
            AgeBracket::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationNote {
    pub id: String,
    pub date: String,
    pub doctor: String,
    pub notes: String,
    pub symptoms: Vec<String>,
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub date: String,
    pub medications: Vec<Medication>,
    pub instructions: String,
    pub valid_until: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// One patient on the roster, with their consultation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    pub last_visit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<String>,
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_id: Option<String>,
    #[serde(default)]
    pub lab_reports: Vec<String>,
    #[serde(default)]
    pub consultation_notes: Vec<ConsultationNote>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

impl Patient {
    pub fn age_bracket(&self) -> AgeBracket {
        AgeBracket::from_age(self.age)
    }
}

impl Queryable for Patient {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        let mut fields: Vec<Cow<'_, str>> = vec![
            Cow::from(self.name.as_str()),
            Cow::from(self.id.as_str()),
        ];
        if let Some(email) = &self.email {
            fields.push(Cow::from(email.as_str()));
        }
        fields.extend(self.medical_history.iter().map(|h| Cow::from(h.as_str())));
        fields.extend(self.allergies.iter().map(|a| Cow::from(a.as_str())));
        fields
    }

    fn search_exact(&self) -> Vec<&str> {
        vec![self.phone.as_str()]
    }

    fn filter_field(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::from(self.status.as_str())),
            "gender" => Some(Cow::from(self.gender.as_str())),
            "age_range" => Some(Cow::from(self.age_bracket().as_str())),
            _ => None,
        }
    }

    fn sort_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::text(self.name.clone())),
            "age" => Some(FieldValue::Integer(self.age as i64)),
            "last_visit" => Some(FieldValue::date(&self.last_visit)),
            "next_appointment" => Some(
                self.next_appointment
                    .as_deref()
                    .map(FieldValue::date)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}

/// Built-in sample roster used when no data file is given.
pub fn sample_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "P-001".to_string(),
            name: "John Doe".to_string(),
            age: 45,
            gender: Gender::Male,
            blood_group: Some("O+".to_string()),
            phone: "+1 (555) 123-4567".to_string(),
            email: Some("john.doe@email.com".to_string()),
            address: Some("123 Main St, New York, NY 10001".to_string()),
            emergency_contact: Some("+1 (555) 987-6543".to_string()),
            medical_history: vec![
                "Hypertension (2019)".to_string(),
                "Asthma (2020)".to_string(),
                "Appendectomy (2018)".to_string(),
            ],
            allergies: vec![
                "Penicillin".to_string(),
                "Peanuts".to_string(),
                "Dust".to_string(),
            ],
            chronic_conditions: vec![
                "Hypertension".to_string(),
                "Type 2 Diabetes".to_string(),
            ],
            last_visit: "2024-11-20".to_string(),
            next_appointment: Some("2024-12-15".to_string()),
            status: PatientStatus::Active,
            insurance_id: Some("INS-789456".to_string()),
            lab_reports: vec![
                "Blood Work - Nov 2024".to_string(),
                "ECG Report - Nov 2024".to_string(),
            ],
            consultation_notes: vec![ConsultationNote {
                id: "CN-001".to_string(),
                date: "2024-11-20".to_string(),
                doctor: "Dr. Sarah Johnson".to_string(),
                notes: "Patient presented with elevated blood pressure. Recommended lifestyle changes."
                    .to_string(),
                symptoms: vec![
                    "High BP".to_string(),
                    "Headache".to_string(),
                    "Fatigue".to_string(),
                ],
                diagnosis: "Hypertension Stage 1".to_string(),
                follow_up_date: Some("2024-12-15".to_string()),
            }],
            prescriptions: vec![Prescription {
                id: "RX-001".to_string(),
                date: "2024-11-20".to_string(),
                medications: vec![
                    Medication {
                        name: "Lisinopril".to_string(),
                        dosage: "10mg".to_string(),
                        frequency: "Once daily".to_string(),
                        duration: "30 days".to_string(),
                    },
                    Medication {
                        name: "Metformin".to_string(),
                        dosage: "500mg".to_string(),
                        frequency: "Twice daily".to_string(),
                        duration: "30 days".to_string(),
                    },
                ],
                instructions: "Take with food. Monitor blood pressure twice daily.".to_string(),
                valid_until: "2024-12-20".to_string(),
            }],
        },
        Patient {
            id: "P-002".to_string(),
            name: "Emily Carter".to_string(),
            age: 8,
            gender: Gender::Female,
            blood_group: Some("A+".to_string()),
            phone: "+1 (555) 234-5678".to_string(),
            email: None,
            address: Some("48 Elm Ave, Brooklyn, NY 11201".to_string()),
            emergency_contact: Some("+1 (555) 876-5432".to_string()),
            medical_history: vec!["Tonsillitis (2023)".to_string()],
            allergies: vec!["Amoxicillin".to_string()],
            chronic_conditions: Vec::new(),
            last_visit: "2024-12-01".to_string(),
            next_appointment: Some("2024-12-15".to_string()),
            status: PatientStatus::Regular,
            insurance_id: Some("INS-223344".to_string()),
            lab_reports: Vec::new(),
            consultation_notes: Vec::new(),
            prescriptions: Vec::new(),
        },
        Patient {
            id: "P-003".to_string(),
            name: "Robert Miles".to_string(),
            age: 67,
            gender: Gender::Male,
            blood_group: Some("B-".to_string()),
            phone: "+1 (555) 345-6789".to_string(),
            email: Some("r.miles@email.com".to_string()),
            address: None,
            emergency_contact: None,
            medical_history: vec![
                "Type 2 Diabetes (2012)".to_string(),
                "Cataract surgery (2021)".to_string(),
            ],
            allergies: Vec::new(),
            chronic_conditions: vec!["Type 2 Diabetes".to_string()],
            last_visit: "2024-11-28".to_string(),
            next_appointment: Some("2024-12-15".to_string()),
            status: PatientStatus::Active,
            insurance_id: Some("INS-556677".to_string()),
            lab_reports: vec!["HbA1c - Dec 2024".to_string()],
            consultation_notes: Vec::new(),
            prescriptions: Vec::new(),
        },
        Patient {
            id: "P-004".to_string(),
            name: "Priya Sharma".to_string(),
            age: 31,
            gender: Gender::Female,
            blood_group: None,
            phone: "+1 (555) 456-7890".to_string(),
            email: Some("priya.sharma@email.com".to_string()),
            address: None,
            emergency_contact: None,
            medical_history: vec!["Migraine (2017)".to_string()],
            allergies: vec!["Latex".to_string()],
            chronic_conditions: Vec::new(),
            last_visit: "2024-12-16".to_string(),
            next_appointment: None,
            status: PatientStatus::Inactive,
            insurance_id: None,
            lab_reports: Vec::new(),
            consultation_notes: Vec::new(),
            prescriptions: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bracket_boundaries() {
        assert_eq!(AgeBracket::from_age(0), AgeBracket::Child);
        assert_eq!(AgeBracket::from_age(12), AgeBracket::Child);
        assert_eq!(AgeBracket::from_age(13), AgeBracket::Adult);
        assert_eq!(AgeBracket::from_age(60), AgeBracket::Adult);
        assert_eq!(AgeBracket::from_age(61), AgeBracket::Senior);
    }

    #[test]
    fn test_search_text_covers_history_and_allergies() {
        let patients = sample_patients();
        let fields = patients[0].search_text();
        assert!(fields.iter().any(|f| f.contains("Asthma (2020)")));
        assert!(fields.iter().any(|f| f.contains("Penicillin")));
        assert!(fields.iter().any(|f| f == "P-001"));
    }

    #[test]
    fn test_missing_next_appointment_sorts_as_null() {
        let patients = sample_patients();
        let priya = patients.iter().find(|p| p.id == "P-004").unwrap();
        assert_eq!(
            priya.sort_field("next_appointment"),
            Some(FieldValue::Null)
        );
    }

    #[test]
    fn test_gender_serde_matches_portal_values() {
        let p = &sample_patients()[0];
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["gender"], "Male");
        assert_eq!(json["status"], "active");
    }
}
