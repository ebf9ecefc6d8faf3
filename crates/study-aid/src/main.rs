mod analysis;
mod api;
mod config;
mod error;
mod model;
mod oracle;
mod parser;
mod rate_limit;
mod resources;
mod server;
mod topic;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use study_common::openai::{OpenAiClient, OpenAiClientConfig};
use study_common::usage::UsageTracker;

use config::Config;
use oracle::ChatOracle;
use rate_limit::RateLimiter;
use server::{AppState, TokenBudgets};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting study-aid server");

    let config = Config::from_env()?;
    info!(
        listen_addr = %config.listen_addr,
        model = %config.model,
        summary_max_tokens = config.summary_max_tokens,
        quiz_max_tokens = config.quiz_max_tokens,
        "configuration loaded"
    );

    let keywords = config.keyword_table()?;
    let resources = config.resource_table()?;
    info!(
        topics = keywords.entries().len(),
        custom_keywords = config.keywords_path.is_some(),
        custom_resources = config.resources_path.is_some(),
        "lookup tables loaded"
    );

    let openai_config = OpenAiClientConfig::from_env();
    if openai_config.api_key.is_none() {
        warn!("no OPENROUTER_API_KEY or OPENAI_API_KEY set, oracle calls will likely be rejected");
    }
    let openai = OpenAiClient::new(openai_config)?;
    info!(
        base_url = %openai.config().base_url,
        timeout_ms = openai.config().default_timeout.as_millis(),
        "oracle client configured"
    );

    let limiter = config.rate_limit_rps.and_then(RateLimiter::new);
    if let Some(limiter) = &limiter {
        info!(rps = limiter.rps(), "rate limiting enabled");
    }

    let usage = UsageTracker::new();
    let oracle = Arc::new(ChatOracle::new(openai, config.model.clone(), usage.clone()));

    let state = AppState::new(
        oracle,
        keywords,
        resources,
        usage,
        limiter,
        TokenBudgets {
            summary: config.summary_max_tokens,
            quiz: config.quiz_max_tokens,
        },
    );

    server::serve(state, config.listen_addr).await
}
