use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::ClientError;

use crate::models::Doctor;

/// Doctor listing for the booking picker. Nothing is cached; the directory
/// is only as fresh as its last fetch.
pub struct DoctorDirectory {
    api: Arc<ApiClient>,
}

impl DoctorDirectory {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, auth_token: &str) -> Result<Vec<Doctor>, ClientError> {
        debug!("Fetching doctor directory");
        self.api
            .request(Method::GET, "/doctors", Some(auth_token), None)
            .await
    }
}
