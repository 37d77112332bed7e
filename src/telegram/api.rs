// src/telegram/api.rs
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

const TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiReply<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiReply<T> {
    fn into_result(self) -> Result<T, AppError> {
        if !self.ok {
            return Err(AppError::Telegram(
                self.description.unwrap_or_else(|| "no description".to_string()),
            ));
        }
        self.result
            .ok_or_else(|| AppError::Telegram("ok reply without result".to_string()))
    }
}

#[derive(Clone)]
pub struct BotApi {
    http: reqwest::Client,
    base_url: String,
}

impl BotApi {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(format!("{TELEGRAM_API}/bot{token}"))
    }

    /// Point the client at a different Bot API host (a local Bot API server,
    /// or a mock in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Long-poll for updates past `offset`. Blocks up to `timeout_secs` on
    /// the Telegram side when no updates are pending.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, AppError> {
        let url = format!("{}/getUpdates", self.base_url);
        let reply: ApiReply<Vec<Update>> = self
            .http
            .get(&url)
            .query(&[("offset", offset.to_string()), ("timeout", timeout_secs.to_string())])
            .send()
            .await?
            .json()
            .await?;
        reply.into_result()
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        let url = format!("{}/sendMessage", self.base_url);
        let reply: ApiReply<serde_json::Value> = self
            .http
            .post(&url)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?
            .json()
            .await?;
        reply.into_result().map(|_| ())
    }
}
