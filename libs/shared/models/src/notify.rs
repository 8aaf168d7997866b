use tracing::{error, info};

/// Seam for user-facing toast notifications. Network failures never block or
/// crash a flow; they land here and the triggering state is left intact.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink that writes notifications to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!("notification: {}", message);
    }

    fn error(&self, message: &str) {
        error!("notification: {}", message);
    }
}
