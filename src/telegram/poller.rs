// src/telegram/poller.rs
use std::time::Duration;

use super::api::{BotApi, Update};
use crate::services::chatbot::ChatEngine;

pub const GREETING: &str = "Welcome to Crypto Buddy! Ask me anything about cryptocurrencies.";

const POLL_TIMEOUT_SECS: u64 = 30;

/// Poll for updates forever, handling each one in arrival order.
pub async fn run(bot: BotApi, engine: ChatEngine) {
    tracing::info!("telegram poller started");
    let mut offset = 0i64;

    loop {
        let updates = match bot.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!(error = %err, "getUpdates failed");
                tokio::time::sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            handle_update(&bot, &engine, update).await;
        }
    }
}

async fn handle_update(bot: &BotApi, engine: &ChatEngine, update: Update) {
    let Some(message) = update.message else { return };
    let Some(text) = message.text.as_deref() else { return };

    let Some(reply) = reply_for(engine, text).await else { return };

    if let Err(err) = bot.send_message(message.chat.id, &reply).await {
        tracing::warn!(error = %err, chat_id = message.chat.id, "sendMessage failed");
    }
}

/// Reply for one incoming text, or `None` for commands the bot ignores.
pub async fn reply_for(engine: &ChatEngine, text: &str) -> Option<String> {
    if let Some(command) = text.strip_prefix('/') {
        let name = command.split(['@', ' ']).next().unwrap_or("");
        if name == "start" {
            return Some(GREETING.to_string());
        }
        // Unrecognized commands are dropped, matching a text-and-not-command
        // message filter.
        return None;
    }
    Some(engine.ask(text).await)
}
