//! Console loopback transport.
//!
//! Lets the daemon run without a chat backend wired in: stdin lines of the
//! form `<user_id> <text>` become inbound events, outbound sends are
//! printed. Useful for local operation and manual testing of the dialogue
//! flow.

use std::io::BufRead;
use std::path::Path;
use std::thread;

use tokio::sync::mpsc;

use crate::core::chat::transport::{ChatEvent, ChatId, ChatTransport};
use crate::error::Result;

pub struct ConsoleTransport;

impl ChatTransport for ConsoleTransport {
    fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        println!("[chat {}] {}", chat_id, text);
        Ok(())
    }

    fn send_document(&self, chat_id: ChatId, path: &Path) -> Result<()> {
        println!("[chat {}] <document: {}>", chat_id, path.display());
        Ok(())
    }
}

/// Feed stdin lines into the chat event channel from a dedicated thread.
///
/// The thread ends when stdin closes or the receiver is dropped.
pub fn spawn_stdin_reader(tx: mpsc::Sender<ChatEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(event) = parse_line(&line) else {
                if !line.trim().is_empty() {
                    log::warn!("Ignoring malformed console input: {}", line);
                }
                continue;
            };
            if tx.blocking_send(event).is_err() {
                break;
            }
        }
    });
}

/// `<user_id> <text>` with the chat id equal to the user id.
fn parse_line(line: &str) -> Option<ChatEvent> {
    let trimmed = line.trim();
    let (id_part, text) = trimmed.split_once(' ')?;
    let user_id: i64 = id_part.parse().ok()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(ChatEvent {
        user_id,
        chat_id: user_id,
        text: text.to_string(),
    })
}
