pub mod auth;
pub mod envelope;
pub mod error;
pub mod notify;

pub use auth::{Session, UserRole};
pub use envelope::ApiEnvelope;
pub use error::ClientError;
pub use notify::{Notifier, TracingNotifier};
