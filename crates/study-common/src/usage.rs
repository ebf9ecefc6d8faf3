use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::openai::ChatCompletionUsage;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub models: Vec<ModelUsageStats>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsageStats {
    pub model: String,
    pub requests: u64,
    pub total_tokens: Option<u64>,
    pub token_counted_requests: u64,
    pub token_unknown_requests: u64,
}

/// Per-model request and token counters for the lifetime of the process.
#[derive(Clone, Default)]
pub struct UsageTracker {
    by_model: Arc<Mutex<HashMap<String, ModelUsageStats>>>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, model: &str, usage: Option<&ChatCompletionUsage>) {
        let mut by_model = self.by_model.lock().await;
        let stat = by_model
            .entry(model.to_string())
            .or_insert_with(|| ModelUsageStats {
                model: model.to_string(),
                ..ModelUsageStats::default()
            });
        stat.requests += 1;

        match usage.and_then(|u| u.total_tokens) {
            Some(total) => {
                stat.total_tokens = Some(stat.total_tokens.unwrap_or(0) + total);
                stat.token_counted_requests += 1;
            }
            None => stat.token_unknown_requests += 1,
        }
    }

    pub async fn get_usage_stats(&self) -> UsageStats {
        let by_model = self.by_model.lock().await;
        let mut models: Vec<ModelUsageStats> = by_model.values().cloned().collect();
        models.sort_by(|a, b| a.model.cmp(&b.model));
        UsageStats { models }
    }
}
