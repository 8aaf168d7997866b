pub mod booking;
pub mod doctors;
pub mod form;
pub mod schedule;
pub mod slots;
pub mod view;

pub use booking::AppointmentClient;
pub use doctors::DoctorDirectory;
pub use form::{BookingDraft, FormStage};
pub use schedule::ScheduleController;
pub use slots::{SlotBatch, SlotFetcher};
