use std::sync::Arc;

use chrono::NaiveDateTime;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::ClientError;

use crate::models::{
    Appointment, AppointmentQuery, AppointmentStatus, CreateAppointmentRequest,
    RescheduleRequest, StatusUpdateRequest,
};

/// Raw appointment endpoints. No local state: every mutation returns the
/// server's representation and the caller reconciles by re-fetching the
/// whole collection.
pub struct AppointmentClient {
    api: Arc<ApiClient>,
}

impl AppointmentClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        query: &AppointmentQuery,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, ClientError> {
        let path = format!("/appointments{}", query.to_query_string());
        debug!("Fetching appointments: {}", path);
        self.api
            .request(Method::GET, &path, Some(auth_token), None)
            .await
    }

    pub async fn create(
        &self,
        request: &CreateAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, ClientError> {
        debug!(
            "Creating appointment with doctor {} at {}",
            request.doctor_id, request.appointment_date
        );
        self.api
            .request(
                Method::POST,
                "/appointments",
                Some(auth_token),
                Some(json!(request)),
            )
            .await
    }

    /// Appointments are never deleted; cancellation is a requested status
    /// transition like any other.
    pub async fn cancel(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Appointment, ClientError> {
        debug!("Cancelling appointment {}", appointment_id);
        let path = format!(
            "/appointments/{}/status",
            urlencoding::encode(appointment_id)
        );
        self.api
            .request(
                Method::PUT,
                &path,
                Some(auth_token),
                Some(json!(StatusUpdateRequest {
                    status: AppointmentStatus::Cancelled,
                })),
            )
            .await
    }

    pub async fn reschedule(
        &self,
        appointment_id: &str,
        new_date: NaiveDateTime,
        auth_token: &str,
    ) -> Result<Appointment, ClientError> {
        debug!("Rescheduling appointment {} to {}", appointment_id, new_date);
        let path = format!(
            "/appointments/{}/reschedule",
            urlencoding::encode(appointment_id)
        );
        self.api
            .request(
                Method::PUT,
                &path,
                Some(auth_token),
                Some(json!(RescheduleRequest { new_date })),
            )
            .await
    }
}
