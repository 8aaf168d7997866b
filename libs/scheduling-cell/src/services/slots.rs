use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::ClientError;

use crate::models::TimeSlot;

/// Slot list for one doctor/date query, stamped with the generation of the
/// request that produced it.
#[derive(Debug, Clone)]
pub struct SlotBatch {
    pub generation: u64,
    pub slots: Vec<TimeSlot>,
}

/// Fetches bookable slots for a doctor/date pair. In-flight requests are not
/// cancellable, so each fetch is stamped with a monotonically increasing
/// generation and only a batch matching the latest issued generation may be
/// applied; a late response for an abandoned query is dropped instead of
/// overwriting a newer one.
pub struct SlotFetcher {
    api: Arc<ApiClient>,
    generation: AtomicU64,
}

impl SlotFetcher {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn fetch(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<SlotBatch, ClientError> {
        if doctor_id.is_empty() {
            return Err(ClientError::InvalidInput(
                "doctor id is required".to_string(),
            ));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Fetching slots for doctor {} on {} (generation {})",
            doctor_id, date, generation
        );

        let path = format!(
            "/doctors/{}/available-slots?date={}",
            urlencoding::encode(doctor_id),
            date
        );
        let slots: Vec<TimeSlot> = self
            .api
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        Ok(SlotBatch { generation, slots })
    }

    /// True while no newer fetch has been issued since this batch.
    pub fn is_current(&self, batch: &SlotBatch) -> bool {
        self.generation.load(Ordering::SeqCst) == batch.generation
    }
}
