use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use session_cell::services::SessionStore;
use shared_api::ApiClient;
use shared_models::{ClientError, Notifier};

use crate::models::{
    Appointment, AppointmentMode, AppointmentQuery, CreateAppointmentRequest, TimeSlot,
};
use crate::services::booking::AppointmentClient;
use crate::services::form::BookingDraft;
use crate::services::slots::{SlotBatch, SlotFetcher};

const DEFAULT_DURATION_MINUTES: i32 = 30;
const DEFAULT_APPOINTMENT_TYPE: &str = "consultation";

/// Screen-level state for the booking flow: the draft, the slot list for the
/// current doctor/date pair and the appointment collection. All network
/// failures are consumed here and surfaced through the notifier; the
/// triggering state is always left intact so the user can retry manually.
/// Nothing is retried automatically.
pub struct ScheduleController {
    client: AppointmentClient,
    slot_fetcher: SlotFetcher,
    sessions: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    draft: BookingDraft,
    slot_list: Vec<TimeSlot>,
    appointments: Vec<Appointment>,
    query: AppointmentQuery,
    pending_key: Option<Uuid>,
}

impl ScheduleController {
    pub fn new(
        api: Arc<ApiClient>,
        sessions: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client: AppointmentClient::new(Arc::clone(&api)),
            slot_fetcher: SlotFetcher::new(api),
            sessions,
            notifier,
            draft: BookingDraft::new(),
            slot_list: Vec::new(),
            appointments: Vec::new(),
            query: AppointmentQuery::default(),
            pending_key: None,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slot_list
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn set_query(&mut self, query: AppointmentQuery) {
        self.query = query;
    }

    /// Selecting a doctor clears any previously selected slot and re-fetches
    /// availability for the new pair.
    pub async fn select_doctor(&mut self, doctor_id: &str) {
        self.draft.select_doctor(doctor_id);
        self.refresh_slots().await;
    }

    /// Selecting a date clears any previously selected slot and re-fetches
    /// availability for the new pair.
    pub async fn select_date(&mut self, date: NaiveDate) {
        self.draft.select_date(date);
        self.refresh_slots().await;
    }

    pub fn select_slot(&mut self, time: &str) {
        self.draft.select_slot(time);
    }

    pub fn set_reason(&mut self, reason: &str) {
        self.draft.set_reason(reason);
    }

    pub fn set_mode(&mut self, mode: AppointmentMode) {
        self.draft.set_mode(mode);
    }

    pub fn set_appointment_type(&mut self, appointment_type: &str) {
        self.draft.set_appointment_type(appointment_type);
    }

    pub fn can_submit(&self) -> bool {
        self.draft.ready_to_submit()
    }

    /// The shared fetcher, for callers that drive their own fetch tasks
    /// (a spawned fetch per selection change) and apply results later.
    pub fn slot_fetcher(&self) -> &SlotFetcher {
        &self.slot_fetcher
    }

    /// Applies a fetched batch to the slot list, unless a newer fetch has
    /// been issued since the batch was stamped. This is the only path by
    /// which slot responses reach the list, so a late response for an
    /// abandoned doctor/date query can never overwrite a newer one.
    pub fn apply_slots(&mut self, batch: SlotBatch) {
        if self.slot_fetcher.is_current(&batch) {
            self.slot_list = batch.slots;
        } else {
            debug!("Dropping stale slot batch (generation {})", batch.generation);
        }
    }

    /// Re-fetches the slot list for the current doctor/date pair. The old
    /// list is dropped up front; the result goes through [`Self::apply_slots`].
    async fn refresh_slots(&mut self) {
        self.slot_list.clear();

        let (Some(doctor_id), Some(date)) = (self.draft.doctor_id.clone(), self.draft.date)
        else {
            return;
        };

        let token = match self.sessions.require_token() {
            Ok(token) => token,
            Err(e) => {
                self.notifier.error(&e.user_message());
                return;
            }
        };

        match self.slot_fetcher.fetch(&doctor_id, date, &token).await {
            Ok(batch) => self.apply_slots(batch),
            Err(e) => {
                self.notifier.error(&e.user_message());
            }
        }
    }

    /// Books the current draft. Returns false without sending anything while
    /// the draft is incomplete. On success the form resets to empty and the
    /// collection is fully re-fetched; on failure the draft and its
    /// idempotency key are preserved for a manual retry.
    pub async fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }

        match self.try_submit().await {
            Ok(appointment) => {
                info!("Appointment {} booked", appointment.id);
                self.pending_key = None;
                self.draft.reset();
                self.slot_list.clear();
                self.refresh_appointments().await;
                self.notifier.success("Appointment booked");
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message());
                false
            }
        }
    }

    async fn try_submit(&mut self) -> Result<Appointment, ClientError> {
        let token = self.sessions.require_token()?;
        let appointment_date = self.draft.combined_datetime()?;

        // The key survives failed attempts of the same draft, so a resubmit
        // after a timeout is deduplicated server-side instead of double-
        // booking.
        let idempotency_key = *self.pending_key.get_or_insert_with(Uuid::new_v4);

        let request = CreateAppointmentRequest {
            doctor_id: self
                .draft
                .doctor_id
                .clone()
                .ok_or_else(|| ClientError::InvalidInput("no doctor selected".to_string()))?,
            appointment_date,
            reason: self.draft.reason.clone(),
            mode: self.draft.mode.unwrap_or(AppointmentMode::Video),
            appointment_type: self
                .draft
                .appointment_type
                .clone()
                .unwrap_or_else(|| DEFAULT_APPOINTMENT_TYPE.to_string()),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            idempotency_key,
        };

        self.client.create(&request, &token).await
    }

    /// Requests the cancelled transition, then reconciles by re-fetching.
    pub async fn cancel(&mut self, appointment_id: &str) -> bool {
        let result = async {
            let token = self.sessions.require_token()?;
            self.client.cancel(appointment_id, &token).await
        }
        .await;

        match result {
            Ok(_) => {
                self.refresh_appointments().await;
                self.notifier.success("Appointment cancelled");
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message());
                false
            }
        }
    }

    pub async fn reschedule(&mut self, appointment_id: &str, new_date: NaiveDateTime) -> bool {
        let result = async {
            let token = self.sessions.require_token()?;
            self.client.reschedule(appointment_id, new_date, &token).await
        }
        .await;

        match result {
            Ok(_) => {
                self.refresh_appointments().await;
                self.notifier.success("Appointment rescheduled");
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message());
                false
            }
        }
    }

    /// Full re-fetch of the appointment collection, last-write-wins. On
    /// failure the previous collection is kept as-is.
    pub async fn refresh_appointments(&mut self) -> bool {
        let result = async {
            let token = self.sessions.require_token()?;
            self.client.list(&self.query, &token).await
        }
        .await;

        match result {
            Ok(appointments) => {
                self.appointments = appointments;
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message());
                false
            }
        }
    }
}
