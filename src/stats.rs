//! Pure counts behind the console's dashboard cards and screen headers.
//!
//! All functions read the full (unfiltered) collection; the query
//! pipeline is not involved.

use crate::domain::appointment::{Appointment, AppointmentStatus, Priority, VisitType};
use crate::domain::patient::{Patient, PatientStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub completed: usize,
}

pub fn appointment_stats(appointments: &[Appointment]) -> AppointmentStats {
    AppointmentStats {
        total: appointments.len(),
        confirmed: count_status(appointments, AppointmentStatus::Confirmed),
        pending: count_status(appointments, AppointmentStatus::Pending),
        completed: count_status(appointments, AppointmentStatus::Completed),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTypeDistribution {
    pub new: usize,
    pub follow_up: usize,
    pub review: usize,
}

pub fn visit_type_distribution(appointments: &[Appointment]) -> VisitTypeDistribution {
    VisitTypeDistribution {
        new: count_type(appointments, VisitType::New),
        follow_up: count_type(appointments, VisitType::FollowUp),
        review: count_type(appointments, VisitType::Review),
    }
}

/// Priority buckets as the dashboard groups them: emergency counts as
/// high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn priority_distribution(appointments: &[Appointment]) -> PriorityDistribution {
    PriorityDistribution {
        high: appointments
            .iter()
            .filter(|a| matches!(a.priority, Priority::High | Priority::Emergency))
            .count(),
        medium: appointments
            .iter()
            .filter(|a| a.priority == Priority::Medium)
            .count(),
        low: appointments
            .iter()
            .filter(|a| a.priority == Priority::Low)
            .count(),
    }
}

/// Today's queue as the dashboard header shows it: confirmed and
/// pending are still waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub waiting: usize,
    pub completed: usize,
}

pub fn queue_stats(appointments: &[Appointment]) -> QueueStats {
    QueueStats {
        waiting: appointments
            .iter()
            .filter(|a| {
                matches!(
                    a.status,
                    AppointmentStatus::Confirmed | AppointmentStatus::Pending
                )
            })
            .count(),
        completed: count_status(appointments, AppointmentStatus::Completed),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientStats {
    pub total: usize,
    pub active: usize,
    pub regular: usize,
}

pub fn patient_stats(patients: &[Patient]) -> PatientStats {
    PatientStats {
        total: patients.len(),
        active: patients
            .iter()
            .filter(|p| p.status == PatientStatus::Active)
            .count(),
        regular: patients
            .iter()
            .filter(|p| p.status == PatientStatus::Regular)
            .count(),
    }
}

fn count_status(appointments: &[Appointment], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.status == status).count()
}

fn count_type(appointments: &[Appointment], visit_type: VisitType) -> usize {
    appointments
        .iter()
        .filter(|a| a.visit_type == visit_type)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::sample_appointments;
    use crate::domain::patient::sample_patients;

    #[test]
    fn test_appointment_stats() {
        let appointments = sample_appointments();
        let stats = appointment_stats(&appointments);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.confirmed, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn test_priority_groups_emergency_as_high() {
        let appointments = sample_appointments();
        let dist = priority_distribution(&appointments);
        assert_eq!(dist.high, 2); // one high, one emergency
        assert_eq!(dist.medium, 4);
        assert_eq!(dist.low, 2);
    }

    #[test]
    fn test_queue_counts_confirmed_and_pending_as_waiting() {
        let appointments = sample_appointments();
        let queue = queue_stats(&appointments);
        assert_eq!(queue.waiting, 5);
        assert_eq!(queue.completed, 1);
    }

    #[test]
    fn test_patient_stats() {
        let patients = sample_patients();
        let stats = patient_stats(&patients);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.regular, 1);
    }

    #[test]
    fn test_visit_type_distribution() {
        let appointments = sample_appointments();
        let dist = visit_type_distribution(&appointments);
        assert_eq!(dist.new + dist.follow_up + dist.review, 8);
        assert_eq!(dist.follow_up, 3);
    }
}
