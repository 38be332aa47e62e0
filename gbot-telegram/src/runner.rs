//! REPL runner: wires config, storage, and tracing together, converts teloxide
//! messages to core events, and feeds them to the [`Dispatcher`].

use std::sync::Arc;

use anyhow::Result;
use conversation::Dispatcher;
use gbot_core::{init_tracing, Bot as CoreBot, ToCoreMessage};
use storage::ProfileRepository;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::BotConfig;

/// Main entry: validate config, init logging, open the profile store, then run
/// the REPL until the process is stopped.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = config
        .log_file
        .as_deref()
        .map(std::path::Path::new)
        .and_then(|p| p.parent())
    {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    init_tracing(config.log_file.as_deref())?;

    info!(database_url = %config.database_url, "Initializing bot");

    let repo = Arc::new(
        ProfileRepository::new(&config.database_url)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url,
                    "Failed to initialize profile storage"
                );
                anyhow::anyhow!("Failed to initialize profile storage: {}", e)
            })?,
    );
    let dispatcher = Arc::new(Dispatcher::new(repo));

    let bot = {
        let bot = Bot::new(config.bot_token.clone());
        if let Some(ref url_str) = config.telegram_api_url {
            match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            }
        } else {
            bot
        }
    };

    info!("Bot started successfully");

    run_repl(bot, dispatcher).await
}

/// Starts the REPL with the given teloxide Bot and Dispatcher. Each inbound
/// text message is dispatched in a spawned task (the per-chat lock inside the
/// Dispatcher serializes transitions for one chat) and the returned replies
/// are sent back through the adapter, in order.
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let adapter = Arc::new(TelegramBotAdapter::new(bot.clone()));

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();
        let adapter = adapter.clone();

        async move {
            if msg.text().is_none() {
                info!(chat_id = msg.chat.id.0, "Received non-text message, ignoring");
                return Ok(());
            }

            let wrapper = TelegramMessageWrapper(&msg);
            let core_msg = wrapper.to_core();

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Received message"
            );

            // Run the conversation step in a spawned task so the REPL returns immediately
            tokio::spawn(async move {
                let replies = dispatcher.dispatch(core_msg.chat.id, &core_msg.content).await;
                for reply in replies {
                    if let Err(e) = adapter.send_message(&core_msg.chat, &reply).await {
                        error!(error = %e, chat_id = core_msg.chat.id, "Failed to send reply");
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
