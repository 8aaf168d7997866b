use thiserror::Error;

/// Client-side failure taxonomy. Every mutating operation catches its own
/// errors at the call site and surfaces them through the notifier; nothing
/// bubbles to a global handler.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No session token available")]
    MissingToken,

    #[error("API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Short text suitable for a user-facing toast. Wire detail stays in the
    /// log, not in the toast.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingToken => "Please log in to continue".to_string(),
            ClientError::Http { .. } | ClientError::Transport(_) => {
                "Something went wrong, please try again".to_string()
            }
            ClientError::Rejected(message) => message.clone(),
            ClientError::Decode(_) => "Unexpected server response".to_string(),
            ClientError::SessionStore(_) => "Could not access saved session".to_string(),
            ClientError::InvalidInput(message) => message.clone(),
        }
    }
}
