use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::UserRole;

// ==============================================================================
// CONVERSATION MODELS
// ==============================================================================

/// Server-maintained conversation summary. Unread count and last message are
/// denormalized views owned by the server; the client only mirrors them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participant: Participant,
    pub unread_count: u32,
    pub last_message: Option<LastMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
}

// ==============================================================================
// MESSAGE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_role: UserRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default)]
    pub reaction: Option<String>,
}

impl Message {
    /// A message is addressed to the viewer when it was sent by the other
    /// participant's role. Marking it read is the only client-initiated
    /// mutation on messages.
    pub fn addressed_to(&self, viewer_role: UserRole) -> bool {
        self.sender_role != viewer_role
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    File,
    Voice,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub from_doctor: bool,
    pub patient_id: String,
    pub doctor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatusUpdate {
    pub status: MessageStatus,
}
