pub mod sync;

pub use sync::{ConversationSync, OpenedConversation};
