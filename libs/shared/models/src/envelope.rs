use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

/// Uniform response wrapper used by every API endpoint:
/// `{success: bool, data: T, message?: string}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// A `success:false` body is treated the same as any other failure,
    /// regardless of HTTP status.
    pub fn into_result(self) -> Result<T, ClientError> {
        if !self.success {
            return Err(ClientError::Rejected(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data.ok_or(ClientError::Rejected(
            "Response missing data".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn successful_envelope_yields_data() {
        let envelope: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap(), 7);
    }

    #[test]
    fn unsuccessful_envelope_is_rejected_with_message() {
        let envelope: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": false, "message": "slot taken"}"#).unwrap();
        assert_matches!(envelope.into_result(), Err(ClientError::Rejected(m)) if m == "slot taken");
    }

    #[test]
    fn successful_envelope_without_data_is_rejected() {
        let envelope: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_matches!(envelope.into_result(), Err(ClientError::Rejected(_)));
    }
}
