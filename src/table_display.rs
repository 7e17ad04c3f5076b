use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::data::query::{QueryResult, QuerySpec};
use crate::domain::appointment::Appointment;
use crate::domain::patient::Patient;
use crate::format::{
    format_date, patient_status_label, priority_label, status_label, visit_type_label,
};

/// Page numbers the pagination control shows: at most five, centered on
/// the current page, clamped at either end.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let length = total.min(5);
    (0..length)
        .map(|i| {
            if total <= 5 {
                i + 1
            } else if current <= 3 {
                i + 1
            } else if current >= total - 2 {
                total - 4 + i
            } else {
                current - 2 + i
            }
        })
        .collect()
}

pub fn display_appointments(result: &QueryResult<'_, Appointment>, spec: &QuerySpec) {
    if result.items.is_empty() {
        println!("{}", "No appointments found.".yellow());
        print_footer(result, spec, "appointments");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(bold_header(&[
        "Token", "Patient", "Age", "Date", "Time", "Reason", "Type", "Priority", "Status",
    ]));

    for appt in &result.items {
        table.add_row(vec![
            appt.token.clone(),
            appt.patient_name.clone(),
            appt.patient_age.to_string(),
            format_date(&appt.date),
            appt.time.clone(),
            appt.reason.clone(),
            visit_type_label(appt.visit_type).to_string(),
            priority_label(appt.priority).to_string(),
            status_label(appt.status),
        ]);
    }

    println!("{table}");
    print_footer(result, spec, "appointments");
}

pub fn display_patients(result: &QueryResult<'_, Patient>, spec: &QuerySpec) {
    if result.items.is_empty() {
        println!("{}", "No patients found.".yellow());
        print_footer(result, spec, "patients");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(bold_header(&[
        "ID",
        "Name",
        "Age",
        "Gender",
        "Phone",
        "Last Visit",
        "Next Appt",
        "Status",
    ]));

    for patient in &result.items {
        table.add_row(vec![
            patient.id.clone(),
            patient.name.clone(),
            patient.age.to_string(),
            patient.gender.as_str().to_string(),
            patient.phone.clone(),
            format_date(&patient.last_visit),
            patient
                .next_appointment
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
            patient_status_label(patient.status).to_string(),
        ]);
    }

    println!("{table}");
    print_footer(result, spec, "patients");
}

fn bold_header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn print_footer<R>(result: &QueryResult<'_, R>, spec: &QuerySpec, noun: &str) {
    if result.total_matched == 0 {
        return;
    }

    let start = spec.page.saturating_sub(1) * spec.page_size.max(1);
    let shown_from = start + 1;
    let shown_to = (start + result.items.len()).min(result.total_matched);

    println!(
        "\n{}",
        format!(
            "Showing {} to {} of {} {} (page {} of {})",
            shown_from, shown_to, result.total_matched, noun, spec.page, result.total_pages
        )
        .green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_small_totals() {
        assert_eq!(page_window(1, 0), Vec::<usize>::new());
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(2, 3), vec![1, 2, 3]);
        assert_eq!(page_window(5, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_clamps_at_the_start() {
        assert_eq!(page_window(1, 9), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 9), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_centers_in_the_middle() {
        assert_eq!(page_window(5, 9), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(6, 9), vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_page_window_clamps_at_the_end() {
        assert_eq!(page_window(8, 9), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(9, 9), vec![5, 6, 7, 8, 9]);
    }
}
