use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Appointment, AppointmentStatus};

/// Pure projections over the appointment collection. Everything here is
/// derived on each call from the same source collection; nothing is stored
/// and nothing touches the network.

/// Appointments whose date component matches the selected calendar day.
pub fn appointments_on(appointments: &[Appointment], selected: NaiveDate) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.date() == selected)
        .collect()
}

/// Every date that has at least one appointment, for the calendar's
/// "has appointment" markers. Independent of the currently selected date.
pub fn marked_dates(appointments: &[Appointment]) -> BTreeSet<NaiveDate> {
    appointments
        .iter()
        .map(|appointment| appointment.date())
        .collect()
}

/// Status-facet filter used by the list view.
pub fn with_status(appointments: &[Appointment], status: AppointmentStatus) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.status == status)
        .collect()
}

/// List rows in chronological order. The source collection is not reordered.
pub fn chronological(appointments: &[Appointment]) -> Vec<&Appointment> {
    let mut rows: Vec<&Appointment> = appointments.iter().collect();
    rows.sort_by_key(|appointment| appointment.appointment_date);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentMode;
    use chrono::NaiveDateTime;

    fn appointment(id: &str, at: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: id.to_string(),
            doctor_id: "doc-a".to_string(),
            patient_id: "pat-1".to_string(),
            appointment_date: NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S").unwrap(),
            duration_minutes: 30,
            mode: AppointmentMode::Video,
            reason: "checkup".to_string(),
            appointment_type: "consultation".to_string(),
            status,
        }
    }

    fn collection() -> Vec<Appointment> {
        vec![
            appointment("a1", "2024-06-10T09:00:00", AppointmentStatus::Confirmed),
            appointment("a2", "2024-06-10T14:30:00", AppointmentStatus::Pending),
            appointment("a3", "2024-06-12T10:00:00", AppointmentStatus::Cancelled),
        ]
    }

    #[test]
    fn filters_by_selected_date() {
        let appointments = collection();
        let rows = appointments_on(&appointments, "2024-06-10".parse().unwrap());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|a| a.date().to_string() == "2024-06-10"));

        let empty = appointments_on(&appointments, "2024-06-11".parse().unwrap());
        assert!(empty.is_empty());
    }

    #[test]
    fn marker_set_spans_all_dates_regardless_of_selection() {
        let appointments = collection();
        let marked = marked_dates(&appointments);
        assert_eq!(marked.len(), 2);
        assert!(marked.contains(&"2024-06-10".parse().unwrap()));
        assert!(marked.contains(&"2024-06-12".parse().unwrap()));
    }

    #[test]
    fn status_facet_selects_matching_rows() {
        let appointments = collection();
        let cancelled = with_status(&appointments, AppointmentStatus::Cancelled);
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, "a3");
    }

    #[test]
    fn chronological_sorts_without_mutating_source() {
        let mut appointments = collection();
        appointments.swap(0, 2);

        let rows = chronological(&appointments);
        let ids: Vec<&str> = rows.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
        // Source order untouched.
        assert_eq!(appointments[0].id, "a3");
    }
}
