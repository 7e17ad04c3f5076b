use clinic_cli::data::query::{run_query, QuerySpec, SortSpec};
use clinic_cli::domain::patient::{Gender, Patient, PatientStatus};

fn patient(id: &str, name: &str, age: u32, gender: Gender, status: PatientStatus) -> Patient {
    Patient {
        id: id.to_string(),
        name: name.to_string(),
        age,
        gender,
        blood_group: None,
        phone: format!("+1 (555) 000-{}", id),
        email: None,
        address: None,
        emergency_contact: None,
        medical_history: Vec::new(),
        allergies: Vec::new(),
        chronic_conditions: Vec::new(),
        last_visit: "2024-11-20".to_string(),
        next_appointment: None,
        status,
        insurance_id: None,
        lab_reports: Vec::new(),
        consultation_notes: Vec::new(),
        prescriptions: Vec::new(),
    }
}

fn roster_fixture() -> Vec<Patient> {
    use Gender::*;
    use PatientStatus::*;
    vec![
        patient("P-001", "John Doe", 45, Male, Active),
        patient("P-002", "Emily Carter", 12, Female, Regular),
        patient("P-003", "Robert Miles", 61, Male, Active),
        patient("P-004", "Priya Sharma", 13, Female, Inactive),
        patient("P-005", "Grace Lin", 60, Female, Active),
    ]
}

#[test]
fn age_bracket_boundaries_follow_the_range_rules() {
    let roster = roster_fixture();

    let child = run_query(&roster, &QuerySpec::new(10).with_filter("age_range", "child"));
    assert_eq!(child.total_matched, 1);
    assert_eq!(child.items[0].name, "Emily Carter"); // 12 is still a child

    let adult = run_query(&roster, &QuerySpec::new(10).with_filter("age_range", "adult"));
    let names: Vec<&str> = adult.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Priya Sharma", "Grace Lin"]); // 13 and 60 inclusive

    let senior = run_query(&roster, &QuerySpec::new(10).with_filter("age_range", "senior"));
    assert_eq!(senior.total_matched, 1);
    assert_eq!(senior.items[0].name, "Robert Miles"); // 61 is senior only
}

#[test]
fn gender_and_status_filters_combine() {
    let roster = roster_fixture();
    let spec = QuerySpec::new(10)
        .with_filter("gender", "Female")
        .with_filter("status", "active");
    let result = run_query(&roster, &spec);
    assert_eq!(result.total_matched, 1);
    assert_eq!(result.items[0].name, "Grace Lin");
}

#[test]
fn search_reaches_medical_history_and_allergies() {
    let mut roster = roster_fixture();
    roster[0].medical_history = vec!["Asthma (2020)".to_string()];
    roster[2].allergies = vec!["Penicillin".to_string()];

    let by_history = run_query(&roster, &QuerySpec::new(10).with_search("asthma"));
    assert_eq!(by_history.total_matched, 1);
    assert_eq!(by_history.items[0].name, "John Doe");

    let by_allergy = run_query(&roster, &QuerySpec::new(10).with_search("penicillin"));
    assert_eq!(by_allergy.total_matched, 1);
    assert_eq!(by_allergy.items[0].name, "Robert Miles");
}

#[test]
fn search_matches_patient_id() {
    let roster = roster_fixture();
    let result = run_query(&roster, &QuerySpec::new(10).with_search("p-004"));
    assert_eq!(result.total_matched, 1);
    assert_eq!(result.items[0].name, "Priya Sharma");
}

#[test]
fn sort_by_age_descending() {
    let roster = roster_fixture();
    let spec = QuerySpec::new(10).with_sort(SortSpec::descending("age"));
    let result = run_query(&roster, &spec);
    let ages: Vec<u32> = result.items.iter().map(|p| p.age).collect();
    assert_eq!(ages, vec![61, 60, 45, 13, 12]);
}

#[test]
fn patients_without_next_appointment_sort_first_ascending() {
    let mut roster = roster_fixture();
    roster[1].next_appointment = Some("2024-12-20".to_string());
    roster[3].next_appointment = Some("2024-12-14".to_string());

    let spec = QuerySpec::new(10).with_sort(SortSpec::ascending("next_appointment"));
    let result = run_query(&roster, &spec);
    let names: Vec<&str> = result.items.iter().map(|p| p.name.as_str()).collect();
    // The three without a booked slot keep collection order up front
    assert_eq!(
        names,
        vec![
            "John Doe",
            "Robert Miles",
            "Grace Lin",
            "Priya Sharma",
            "Emily Carter"
        ]
    );
}

#[test]
fn shared_pipeline_serves_both_record_shapes_unchanged() {
    // The same QuerySpec value drives the patient roster and the
    // appointment book; only the accessor impls differ.
    let roster = roster_fixture();
    let spec = QuerySpec::new(2).with_page(2);
    let result = run_query(&roster, &spec);
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.total_matched, 5);
    assert_eq!(result.total_pages, 3);
}
