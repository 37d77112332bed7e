use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory usage counters. Nothing here survives a restart.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub questions_total: u64,
    pub intent_usage: HashMap<String, u64>,
    pub crypto_usage: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_question(&self, intent: &str, crypto: Option<&str>) {
        let mut data = self.inner.write().await;
        data.questions_total += 1;
        *data.intent_usage.entry(intent.to_string()).or_insert(0) += 1;
        if let Some(name) = crypto {
            *data.crypto_usage.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
