use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use shared_models::ClientError;

use crate::models::AppointmentMode;

/// How far the in-progress booking draft has advanced. Derived from the
/// draft, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStage {
    Empty,
    DoctorSelected,
    DateSelected,
    SlotSelected,
    ReasonEntered,
    ReadyToSubmit,
}

/// The in-progress, not-yet-submitted booking form state. Transitions are
/// additive, except that changing doctor or date always clears the selected
/// slot so a stale slot can never carry over into the new query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub doctor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub slot: Option<String>,
    pub reason: String,
    pub mode: Option<AppointmentMode>,
    pub appointment_type: Option<String>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_doctor(&mut self, doctor_id: &str) {
        if self.doctor_id.as_deref() != Some(doctor_id) {
            self.slot = None;
        }
        self.doctor_id = Some(doctor_id.to_string());
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        if self.date != Some(date) {
            self.slot = None;
        }
        self.date = Some(date);
    }

    pub fn select_slot(&mut self, time: &str) {
        self.slot = Some(time.to_string());
    }

    pub fn clear_slot(&mut self) {
        self.slot = None;
    }

    pub fn set_reason(&mut self, reason: &str) {
        self.reason = reason.to_string();
    }

    pub fn set_mode(&mut self, mode: AppointmentMode) {
        self.mode = Some(mode);
    }

    pub fn set_appointment_type(&mut self, appointment_type: &str) {
        self.appointment_type = Some(appointment_type.to_string());
    }

    /// Pure submit predicate: doctor, date, slot and reason must all be
    /// non-empty. The controller refuses to build a request while this is
    /// false, so the whole class of incomplete-draft requests never reaches
    /// the server.
    pub fn ready_to_submit(&self) -> bool {
        self.doctor_id.as_deref().is_some_and(|d| !d.is_empty())
            && self.date.is_some()
            && self.slot.as_deref().is_some_and(|s| !s.is_empty())
            && !self.reason.trim().is_empty()
    }

    pub fn stage(&self) -> FormStage {
        if self.ready_to_submit() {
            return FormStage::ReadyToSubmit;
        }
        if !self.reason.trim().is_empty() {
            return FormStage::ReasonEntered;
        }
        if self.slot.is_some() {
            return FormStage::SlotSelected;
        }
        if self.date.is_some() {
            return FormStage::DateSelected;
        }
        if self.doctor_id.is_some() {
            return FormStage::DoctorSelected;
        }
        FormStage::Empty
    }

    /// Combined ISO date-time built from the selected date and "HH:MM" slot.
    pub fn combined_datetime(&self) -> Result<NaiveDateTime, ClientError> {
        let date = self
            .date
            .ok_or_else(|| ClientError::InvalidInput("no date selected".to_string()))?;
        let slot = self
            .slot
            .as_deref()
            .ok_or_else(|| ClientError::InvalidInput("no slot selected".to_string()))?;
        let time = NaiveTime::parse_from_str(slot, "%H:%M")
            .map_err(|_| ClientError::InvalidInput(format!("invalid slot time: {}", slot)))?;
        Ok(date.and_time(time))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
