//! Registry of chat identities subscribed to broadcast alerts.
//!
//! Shared between the chat dispatcher (insert on login, remove on logout)
//! and the scheduler (broadcast), so access goes through a lock. Entries
//! live in memory only; a restart starts empty.

use parking_lot::RwLock;
use std::collections::HashSet;

use crate::core::chat::transport::ChatId;

#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    inner: RwLock<HashSet<ChatId>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the chat was already subscribed.
    pub fn insert(&self, chat_id: ChatId) -> bool {
        self.inner.write().insert(chat_id)
    }

    /// Returns false if the chat was not subscribed (logout is idempotent).
    pub fn remove(&self, chat_id: ChatId) -> bool {
        self.inner.write().remove(&chat_id)
    }

    pub fn contains(&self, chat_id: ChatId) -> bool {
        self.inner.read().contains(&chat_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Stable copy for iteration outside the lock.
    pub fn snapshot(&self) -> Vec<ChatId> {
        let mut ids: Vec<ChatId> = self.inner.read().iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
