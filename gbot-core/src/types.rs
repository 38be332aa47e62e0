//! Core types: user, chat, message, and the command keywords the bot reacts to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single incoming text message with user and chat context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Conversation entry and fallback commands.
///
/// `Start` and `Update` open a conversation; `Cancel` aborts one from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Update,
    Cancel,
}

impl Command {
    /// Parses a command from message text. Only the first token is considered;
    /// a `@botname` suffix (group-chat form, e.g. `/start@GetInBot`) is stripped.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.trim().split_whitespace().next()?;
        let keyword = first.split('@').next().unwrap_or(first);
        match keyword {
            "/start" => Some(Command::Start),
            "/update" => Some(Command::Update),
            "/cancel" => Some(Command::Cancel),
            _ => None,
        }
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}
