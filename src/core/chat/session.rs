//! Per-user login/signup dialogue state.
//!
//! A session exists only while a dialogue is in progress and is keyed by
//! user id. Only the chat dispatcher touches this table, so it needs no
//! lock; per-user ordering comes from the dispatcher processing messages
//! in arrival order.

use std::collections::HashMap;

use crate::core::chat::transport::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueStep {
    AwaitingUsername,
    AwaitingPassword { username: String },
}

#[derive(Debug, Clone)]
pub struct UserSession {
    pub action: PendingAction,
    pub step: DialogueStep,
}

/// What the dialogue machine decided for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueOutcome {
    /// A trigger word arrived where a username was expected; ask again.
    Reprompt(PendingAction),
    /// Username stored; ask for the password.
    PasswordPrompt,
    /// Final step reached; the session is already destroyed.
    Credentials {
        action: PendingAction,
        username: String,
        password: String,
    },
}

#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<UserId, UserSession>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a dialogue for a user. A new trigger overwrites any existing
    /// incomplete session.
    pub fn begin(&mut self, user_id: UserId, action: PendingAction) {
        self.sessions.insert(
            user_id,
            UserSession {
                action,
                step: DialogueStep::AwaitingUsername,
            },
        );
    }

    pub fn is_active(&self, user_id: UserId) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// Advance the user's dialogue with one message. Returns `None` when
    /// the user has no active session.
    ///
    /// `text_is_trigger` marks recognized trigger words, which are refused
    /// as usernames. Any text at the password step is the password.
    pub fn advance(
        &mut self,
        user_id: UserId,
        text: &str,
        text_is_trigger: bool,
    ) -> Option<DialogueOutcome> {
        let session = self.sessions.get_mut(&user_id)?;

        match &session.step {
            DialogueStep::AwaitingUsername => {
                if text_is_trigger {
                    return Some(DialogueOutcome::Reprompt(session.action));
                }
                session.step = DialogueStep::AwaitingPassword {
                    username: text.to_string(),
                };
                Some(DialogueOutcome::PasswordPrompt)
            }
            DialogueStep::AwaitingPassword { username } => {
                let outcome = DialogueOutcome::Credentials {
                    action: session.action,
                    username: username.clone(),
                    password: text.to_string(),
                };
                self.sessions.remove(&user_id);
                Some(outcome)
            }
        }
    }
}
