use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{ClientError, Session};

use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::store::SessionStore;

/// Login/register/logout against the auth endpoints. A successful
/// authentication persists the session; logout tears it down wholesale.
pub struct AuthService {
    api: Arc<ApiClient>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<Session, ClientError> {
        debug!("Logging in {}", request.email);

        let response: AuthResponse = self
            .api
            .request(
                Method::POST,
                "/auth/login",
                None,
                Some(json!(request)),
            )
            .await?;

        let session = self.persist(response)?;
        info!("Logged in as {} ({})", session.user_id, session.role);
        Ok(session)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Session, ClientError> {
        debug!("Registering {}", request.email);

        let response: AuthResponse = self
            .api
            .request(
                Method::POST,
                "/auth/register",
                None,
                Some(json!(request)),
            )
            .await?;

        let session = self.persist(response)?;
        info!("Registered {} ({})", session.user_id, session.role);
        Ok(session)
    }

    pub fn logout(&self) {
        self.sessions.clear();
        info!("Logged out");
    }

    fn persist(&self, response: AuthResponse) -> Result<Session, ClientError> {
        let mut session = Session::new(&response.user.id, response.user.role, &response.token);
        session.display_name = response.user.full_name;
        self.sessions.set(session.clone())?;
        Ok(session)
    }
}
