use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub appointment_date: NaiveDateTime,
    pub duration_minutes: i32,
    pub mode: AppointmentMode,
    pub reason: String,
    pub appointment_type: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Date component of the scheduled timestamp, used by the calendar
    /// projections.
    pub fn date(&self) -> NaiveDate {
        self.appointment_date.date()
    }
}

/// Status transitions are server-authoritative; the client only requests a
/// transition and mirrors whatever comes back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Rescheduled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Rescheduled => write!(f, "rescheduled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentMode {
    InPerson,
    Video,
    Phone,
}

impl fmt::Display for AppointmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentMode::InPerson => write!(f, "in-person"),
            AppointmentMode::Video => write!(f, "video"),
            AppointmentMode::Phone => write!(f, "phone"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub full_name: String,
    pub specialty: String,
}

/// A bookable time value for one doctor/date pair. Ephemeral: recomputed on
/// every doctor or date change and never cached across selections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: String,
    pub appointment_date: NaiveDateTime,
    pub reason: String,
    pub mode: AppointmentMode,
    pub appointment_type: String,
    pub duration_minutes: i32,
    /// Client-generated token reused across manual retries of the same draft
    /// so a resubmit after a timeout cannot double-book.
    pub idempotency_key: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub new_date: NaiveDateTime,
}

/// Filter for the appointment collection fetch. Empty fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AppointmentQuery {
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(format!("status={}", status));
        }
        if let Some(start) = self.start_date {
            params.push(format!("startDate={}", start));
        }
        if let Some(end) = self.end_date {
            params.push(format!("endDate={}", end));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn appointment_date_serializes_without_timezone() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let request = CreateAppointmentRequest {
            doctor_id: "doc-a".to_string(),
            appointment_date: date,
            reason: "rash".to_string(),
            mode: AppointmentMode::Video,
            appointment_type: "consultation".to_string(),
            duration_minutes: 30,
            idempotency_key: Uuid::new_v4(),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["appointmentDate"], "2024-06-10T09:00:00");
        assert_eq!(body["mode"], "video");
        assert_eq!(body["doctorId"], "doc-a");
    }

    #[test]
    fn status_uses_lowercase_wire_strings() {
        let body = serde_json::to_value(StatusUpdateRequest {
            status: AppointmentStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(body["status"], "cancelled");
    }

    #[test]
    fn mode_round_trips_kebab_case() {
        let parsed: AppointmentMode = serde_json::from_str("\"in-person\"").unwrap();
        assert_eq!(parsed, AppointmentMode::InPerson);
    }

    #[test]
    fn query_string_omits_empty_fields() {
        assert_eq!(AppointmentQuery::default().to_query_string(), "");

        let query = AppointmentQuery {
            status: Some(AppointmentStatus::Confirmed),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: None,
        };
        assert_eq!(
            query.to_query_string(),
            "?status=confirmed&startDate=2024-06-01"
        );
    }
}
