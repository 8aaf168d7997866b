use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_file: PathBuf,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let config = Self {
            base_url: env::var("TELECARE_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("TELECARE_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            session_file: env::var("TELECARE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("TELECARE_SESSION_FILE not set, using default");
                    PathBuf::from(".telecare-session.json")
                }),
        };

        if !config.is_configured() {
            warn!("Client not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}
