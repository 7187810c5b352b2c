//! Chat-facing side of the engine: command decoding, the login/signup
//! dialogue, subscriptions, and the transport seam.

pub mod auth;
pub mod command;
pub mod console;
pub mod dispatcher;
pub mod session;
pub mod subscribers;
pub mod transport;

pub use auth::{Authenticator, InMemoryAuthenticator};
pub use command::Command;
pub use dispatcher::{chat_task, ChatEngine, Reply};
pub use subscribers::SubscriberRegistry;
pub use transport::{ChatEvent, ChatId, ChatTransport, UserId};
