// src/config.rs
use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Everything the bot needs from the outside world, read once at start-up.
/// Handlers receive this (or pieces of it) explicitly; nothing else in the
/// crate touches the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external AI server, e.g. "http://localhost:5001".
    pub ai_server_url: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Address the HTTP chat API listens on.
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| AppError::Config(format!("BIND_ADDR is not a socket address: {bind_addr}")))?;

        Ok(Self {
            ai_server_url: require("AI_SERVER_URL")?,
            telegram_token: require("TELEGRAM_API_KEY")?,
            bind_addr,
        })
    }
}

fn require(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{key} is not set")))
}
