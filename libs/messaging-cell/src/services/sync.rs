use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use session_cell::services::SessionStore;
use shared_api::ApiClient;
use shared_models::{ClientError, Notifier, UserRole};

use crate::models::{
    Conversation, Message, MessageStatus, MessageStatusUpdate, SendMessageRequest,
};

/// Result of opening a conversation: the message thread with the viewer's
/// unread messages reconciled, plus the refreshed summary list. The summary
/// list is `None` when its re-fetch failed, so the caller keeps its previous
/// one instead of clearing the screen.
#[derive(Debug)]
pub struct OpenedConversation {
    pub messages: Vec<Message>,
    pub conversations: Option<Vec<Conversation>>,
}

impl OpenedConversation {
    /// Appends the server's echo of a just-sent message. This is the one
    /// place the client applies a single returned entity instead of
    /// re-fetching the whole thread.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Pull-only message sync: one fetch per conversation open, no streaming or
/// subscription. Messages are kept in fetch order (server-sorted ascending);
/// the client performs no independent sort.
pub struct ConversationSync {
    api: Arc<ApiClient>,
    sessions: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl ConversationSync {
    pub fn new(
        api: Arc<ApiClient>,
        sessions: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            sessions,
            notifier,
        }
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ClientError> {
        let token = self.sessions.require_token()?;
        self.fetch_conversations(&token).await
    }

    /// Fetches the thread once, then issues exactly one mark-read call per
    /// unread message addressed to the viewer. A message flips to read
    /// locally only after its own update succeeded, so already-read messages
    /// never trigger a call and a failed update leaves its message unread
    /// for the next open.
    pub async fn open(
        &self,
        conversation_id: &str,
        viewer_role: UserRole,
    ) -> Result<OpenedConversation, ClientError> {
        let token = self.sessions.require_token()?;

        let path = format!(
            "/messages/conversations/{}/messages",
            urlencoding::encode(conversation_id)
        );
        let mut messages: Vec<Message> = self
            .api
            .request(Method::GET, &path, Some(&token), None)
            .await?;

        let mut marked = 0usize;
        for message in messages
            .iter_mut()
            .filter(|m| m.addressed_to(viewer_role) && m.status != MessageStatus::Read)
        {
            match self.mark_read(&message.id, &token).await {
                Ok(()) => {
                    message.status = MessageStatus::Read;
                    marked += 1;
                }
                Err(e) => {
                    warn!("Could not mark message {} read: {}", message.id, e);
                    self.notifier.error(&e.user_message());
                }
            }
        }
        debug!(
            "Opened conversation {}: {} messages, {} marked read",
            conversation_id,
            messages.len(),
            marked
        );

        // Refresh the summaries so unread counters catch up. Failure is
        // non-fatal; the caller keeps its previous list.
        let conversations = match self.fetch_conversations(&token).await {
            Ok(conversations) => Some(conversations),
            Err(e) => {
                warn!("Conversation summary refresh failed: {}", e);
                None
            }
        };

        Ok(OpenedConversation {
            messages,
            conversations,
        })
    }

    /// Sends a message and returns the server's echo of the created entity.
    pub async fn send(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<Message, ClientError> {
        let token = self.sessions.require_token()?;
        debug!("Sending message to conversation {}", conversation_id);

        let path = format!(
            "/messages/conversations/{}/messages",
            urlencoding::encode(conversation_id)
        );
        self.api
            .request(Method::POST, &path, Some(&token), Some(json!(request)))
            .await
    }

    async fn mark_read(&self, message_id: &str, token: &str) -> Result<(), ClientError> {
        let path = format!("/messages/{}/status", urlencoding::encode(message_id));
        let _: Value = self
            .api
            .request(
                Method::PUT,
                &path,
                Some(token),
                Some(json!(MessageStatusUpdate {
                    status: MessageStatus::Read,
                })),
            )
            .await?;
        Ok(())
    }

    async fn fetch_conversations(&self, token: &str) -> Result<Vec<Conversation>, ClientError> {
        self.api
            .request(Method::GET, "/messages/conversations", Some(token), None)
            .await
    }
}
