//! Chat transport seam.
//!
//! The chat platform (message delivery, button rendering, file transfer)
//! is an external collaborator; the engine only needs outbound sends and a
//! stream of inbound text events.

use std::path::Path;

use crate::error::Result;

pub type UserId = i64;
pub type ChatId = i64;

/// An inbound text message from a chat user.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub text: String,
}

/// Outbound side of the chat platform.
///
/// Sends are blocking from the caller's perspective; errors surface as
/// delivery faults and are never fatal.
pub trait ChatTransport: Send + Sync {
    fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()>;

    fn send_document(&self, chat_id: ChatId, path: &Path) -> Result<()>;
}
