//! The message-driven chat activity: decides each inbound message into a
//! command, advances dialogues, and serves menu requests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::core::chat::auth::Authenticator;
use crate::core::chat::command::Command;
use crate::core::chat::session::{DialogueOutcome, PendingAction, SessionTable};
use crate::core::chat::subscribers::SubscriberRegistry;
use crate::core::chat::transport::{ChatEvent, ChatTransport};
use crate::core::monitor::publisher::ArtifactPaths;

const HELP_TEXT: &str = "Here are the available commands:\n\
/start - Start the bot and see the main menu\n\
/help - Show this help message\n\
/logout - Log out of the bot\n\
/quit - Shut the bot down\n\
\n\
Other options available from the menu:\n\
- Send me to real-time\n\
- Send me a data analysis\n\
- Send me a graph of current fullness!";

/// What the engine wants sent back for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Document(PathBuf),
    Shutdown,
}

/// Chat-side state and policy. Owned exclusively by the chat task.
pub struct ChatEngine {
    sessions: SessionTable,
    auth: Arc<dyn Authenticator>,
    subscribers: Arc<SubscriberRegistry>,
    artifacts: ArtifactPaths,
    dashboard_url: Option<String>,
}

impl ChatEngine {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        subscribers: Arc<SubscriberRegistry>,
        artifacts: ArtifactPaths,
        dashboard_url: Option<String>,
    ) -> Self {
        Self {
            sessions: SessionTable::new(),
            auth,
            subscribers,
            artifacts,
            dashboard_url,
        }
    }

    /// Handle one inbound message and produce the replies to send.
    pub fn handle(&mut self, event: &ChatEvent) -> Vec<Reply> {
        let command = Command::parse(&event.text);

        // An in-progress dialogue consumes the message first
        if self.sessions.is_active(event.user_id) {
            if let Some(outcome) =
                self.sessions
                    .advance(event.user_id, event.text.trim(), command.is_trigger())
            {
                return self.dialogue_replies(event, outcome);
            }
        }

        match command {
            Command::Start | Command::Back => self.main_menu(event),
            Command::Help => vec![Reply::Message(HELP_TEXT.to_string())],
            Command::Login => {
                self.sessions.begin(event.user_id, PendingAction::Login);
                vec![Reply::Message("Please enter your username:".to_string())]
            }
            Command::Signup => {
                self.sessions.begin(event.user_id, PendingAction::Signup);
                vec![Reply::Message(
                    "Please enter your desired username:".to_string(),
                )]
            }
            Command::Logout => {
                if self.subscribers.remove(event.chat_id) {
                    vec![Reply::Message(
                        "You have been logged out. Please log in again using /start.".to_string(),
                    )]
                } else {
                    vec![Reply::Message("You are not logged in.".to_string())]
                }
            }
            Command::Quit => vec![
                Reply::Message("The bot is shutting down. Goodbye!".to_string()),
                Reply::Shutdown,
            ],
            Command::Analysis => self.authenticated_or_menu(event, |engine| {
                match fs::read_to_string(&engine.artifacts.report) {
                    Ok(text) => vec![Reply::Message(text)],
                    Err(_) => vec![Reply::Message("No analysis available yet.".to_string())],
                }
            }),
            Command::Graph => self.authenticated_or_menu(event, |engine| {
                if engine.artifacts.chart.exists() {
                    vec![
                        Reply::Message("Here is the graph of the current fullness:".to_string()),
                        Reply::Document(engine.artifacts.chart.clone()),
                    ]
                } else {
                    vec![Reply::Message("No chart available yet.".to_string())]
                }
            }),
            Command::RealTime => self.authenticated_or_menu(event, |engine| {
                match &engine.dashboard_url {
                    Some(url) => vec![Reply::Message(format!(
                        "Link to real-time graphing:\n{}",
                        url
                    ))],
                    None => vec![Reply::Message("No live dashboard configured.".to_string())],
                }
            }),
            // Free text outside any dialogue gets the default hint
            Command::Text(_) => vec![Reply::Message("Use /help to get more info.".to_string())],
        }
    }

    fn dialogue_replies(&mut self, event: &ChatEvent, outcome: DialogueOutcome) -> Vec<Reply> {
        match outcome {
            DialogueOutcome::Reprompt(PendingAction::Login) => {
                vec![Reply::Message("Please enter your username:".to_string())]
            }
            DialogueOutcome::Reprompt(PendingAction::Signup) => vec![Reply::Message(
                "Please enter your desired username:".to_string(),
            )],
            DialogueOutcome::PasswordPrompt => {
                vec![Reply::Message("Please enter your password:".to_string())]
            }
            DialogueOutcome::Credentials {
                action: PendingAction::Login,
                username,
                password,
            } => {
                if self.auth.check(&username, &password) {
                    self.subscribers.insert(event.chat_id);
                    let mut replies = vec![Reply::Message(format!(
                        "Welcome, {}! You are now logged in.",
                        username
                    ))];
                    replies.extend(self.main_menu(event));
                    replies
                } else {
                    log::info!("Login failed for user {}", event.user_id);
                    vec![Reply::Message(
                        "Invalid username or password. Please try again.".to_string(),
                    )]
                }
            }
            DialogueOutcome::Credentials {
                action: PendingAction::Signup,
                username,
                password,
            } => {
                if self.auth.exists(&username) {
                    return vec![Reply::Message(
                        "This username is already taken. Please choose a different one."
                            .to_string(),
                    )];
                }
                match self.auth.register(&username, &password) {
                    Ok(()) => {
                        self.subscribers.insert(event.chat_id);
                        let mut replies = vec![Reply::Message(format!(
                            "Welcome, {}! Your account has been created and you are now logged in.",
                            username
                        ))];
                        replies.extend(self.main_menu(event));
                        replies
                    }
                    Err(e) => {
                        log::warn!("Signup failed for user {}: {}", event.user_id, e);
                        vec![Reply::Message(
                            "This username is already taken. Please choose a different one."
                                .to_string(),
                        )]
                    }
                }
            }
        }
    }

    fn main_menu(&self, event: &ChatEvent) -> Vec<Reply> {
        if self.subscribers.contains(event.chat_id) {
            vec![Reply::Message(
                "Welcome! Choose an option:\n\
                 - Send me to real-time\n\
                 - Send me a data analysis\n\
                 - Send me a graph of current fullness!"
                    .to_string(),
            )]
        } else {
            vec![Reply::Message(
                "Welcome! Please select an option:\n- Login\n- Sign Up".to_string(),
            )]
        }
    }

    fn authenticated_or_menu<F>(&mut self, event: &ChatEvent, serve: F) -> Vec<Reply>
    where
        F: FnOnce(&Self) -> Vec<Reply>,
    {
        if self.subscribers.contains(event.chat_id) {
            serve(self)
        } else {
            self.main_menu(event)
        }
    }
}

/// The chat activity: one long-lived task consuming inbound events in
/// arrival order. Shutdown is observed between messages, never mid-message.
pub async fn chat_task(
    mut engine: ChatEngine,
    transport: Arc<dyn ChatTransport>,
    mut events: mpsc::Receiver<ChatEvent>,
    shutdown_tx: broadcast::Sender<()>,
    mut shutdown: broadcast::Receiver<()>,
) {
    log::info!("Chat dispatcher started");

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    log::info!("Chat event stream closed");
                    break;
                };
                for reply in engine.handle(&event) {
                    match reply {
                        Reply::Message(text) => {
                            if let Err(e) = transport.send_message(event.chat_id, &text) {
                                log::warn!("Chat delivery failed: {}", e);
                            }
                        }
                        Reply::Document(path) => {
                            if let Err(e) = transport.send_document(event.chat_id, &path) {
                                log::warn!("Chat document delivery failed: {}", e);
                            }
                        }
                        Reply::Shutdown => {
                            let _ = shutdown_tx.send(());
                        }
                    }
                }
            }
            _ = shutdown.recv() => {
                log::info!("Chat dispatcher shutting down");
                break;
            }
        }
    }
}
