use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::services::intent::{Intent, detect_intent, extract_crypto};
use crate::services::metrics_manager::MetricsManager;

pub const FALLBACK_REPLY: &str = "Could not determine intent or cryptocurrency.";
pub const UNKNOWN_COIN_REPLY: &str =
    "Could not find the coin ID for the specified cryptocurrency.";
pub const PARSE_ERROR_REPLY: &str = "Error parsing response from server.";
pub const EMPTY_REPLY: &str = "No response from server.";
pub const UNSUPPORTED_INTENT_REPLY: &str = "Invalid intent.";

const TIMEFRAME: &str = "month";

/// A resolved reply plus the intent it came from.
#[derive(Debug, Clone)]
pub struct Answer {
    pub reply: String,
    pub intent: Intent,
}

/// The intent resolver and dispatcher. Stateless per question apart from the
/// usage counters; makes at most two calls to the AI server per question.
#[derive(Clone)]
pub struct ChatEngine {
    http: Client,
    base_url: String,
    metrics: MetricsManager,
}

impl ChatEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            // Client defaults on purpose: no timeout, no retries. A slow AI
            // server stalls only the one question in flight.
            http: Client::new(),
            base_url: config.ai_server_url.trim_end_matches('/').to_string(),
            metrics: MetricsManager::new(),
        }
    }

    pub fn metrics(&self) -> &MetricsManager {
        &self.metrics
    }

    /// Produce a reply for one user question. Upstream problems come back as
    /// fixed chat strings, never as errors.
    pub async fn ask(&self, question: &str) -> String {
        self.answer(question).await.reply
    }

    pub async fn answer(&self, question: &str) -> Answer {
        let intent = detect_intent(question);
        let crypto = extract_crypto(question);
        tracing::debug!(intent = intent.label(), ?crypto, question, "classified question");
        self.metrics.record_question(intent.label(), crypto).await;

        let reply = match (intent, crypto) {
            (Intent::Unknown, _) | (_, None) => FALLBACK_REPLY.to_string(),
            (Intent::PriceTrends, Some(name)) => {
                self.metric_reply(name, "price_trends", "response").await
            }
            (Intent::Volatility, Some(name)) => {
                self.metric_reply(name, "volatility", "volatility").await
            }
            (_, Some(_)) => UNSUPPORTED_INTENT_REPLY.to_string(),
        };
        Answer { reply, intent }
    }

    /// Resolve the coin id, fetch one metric endpoint and extract the named
    /// field, mapping every failure to its fixed chat string.
    async fn metric_reply(&self, name: &str, endpoint: &str, field: &str) -> String {
        let coin_id = match self.resolve_coin_id(name).await {
            Ok(Some(id)) => id,
            Ok(None) => return UNKNOWN_COIN_REPLY.to_string(),
            Err(err) => {
                tracing::debug!(error = %err, name, "coin id lookup failed");
                return UNKNOWN_COIN_REPLY.to_string();
            }
        };

        match self.fetch_metric(endpoint, &coin_id, field).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_REPLY.to_string(),
            Err(err) => {
                tracing::debug!(error = %err, endpoint, %coin_id, "metric fetch failed");
                PARSE_ERROR_REPLY.to_string()
            }
        }
    }

    async fn resolve_coin_id(&self, name: &str) -> Result<Option<String>, AppError> {
        let url = format!("{}/api/get_coin_id", self.base_url);
        let response = self.http.get(&url).query(&[("name", name)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %body, "coin id endpoint returned an error");
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let json: Value = response.json().await?;
        Ok(json.get("coin_id").and_then(value_to_text))
    }

    async fn fetch_metric(
        &self,
        endpoint: &str,
        coin_id: &str,
        field: &str,
    ) -> Result<Option<String>, AppError> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("coin_id", coin_id), ("timeframe", TIMEFRAME)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, %body, endpoint, "ai server reply");

        if !status.is_success() {
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let json: Value = serde_json::from_str(&body)?;
        Ok(json.get(field).and_then(value_to_text))
    }
}

// The AI server is loose about types; coin ids and metric fields may be
// strings or numbers.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
