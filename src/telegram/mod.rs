// src/telegram/mod.rs
//! Long-polling Telegram front end. A thin client over the Bot API plus the
//! update loop that feeds incoming text to the chat engine.

pub mod api;
pub mod poller;

pub use api::BotApi;
