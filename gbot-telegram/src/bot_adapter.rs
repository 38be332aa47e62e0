//! Wraps teloxide::Bot and implements [`gbot_core::Bot`]. Production code sends
//! replies via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use gbot_core::{Bot as CoreBot, Chat, GbotError, Result};
use teloxide::{prelude::*, types::ChatId};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| GbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
