//! HTTP API for the study aid.
//!
//! Oracle-backed routes:
//! - `POST /api/summarize`: summary of pasted notes
//! - `POST /api/generate-quiz`: raw quiz text plus its parsed questions
//!
//! Local routes:
//! - `POST /api/parse-quiz`, `POST /api/classify-topic`
//! - `POST /api/analyze-weak-topics`, `POST /api/get-study-resources`
//! - `GET /api/usage`, `GET /api/health`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use study_common::usage::{UsageStats, UsageTracker};

use crate::analysis;
use crate::api::{
    AnalyzeWeakTopicsRequest, AnalyzeWeakTopicsResponse, ApiJson, ClassifyTopicRequest,
    ClassifyTopicResponse, GenerateQuizResponse, HealthResponse, NotesRequest, ParseQuizRequest,
    ParseQuizResponse, StudyResourcesRequest, SummarizeResponse, TopicStatsEntry,
};
use crate::error::AppError;
use crate::model::StudyPath;
use crate::oracle::{quiz_prompt, summary_prompt, Oracle};
use crate::parser::parse_quiz;
use crate::rate_limit::RateLimiter;
use crate::resources::ResourceTable;
use crate::topic::KeywordTable;

/// Response-length budgets for oracle calls, in tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenBudgets {
    pub summary: u32,
    pub quiz: u32,
}

#[derive(Clone)]
pub struct AppState {
    oracle: Arc<dyn Oracle>,
    keywords: Arc<KeywordTable>,
    resources: Arc<ResourceTable>,
    usage: UsageTracker,
    limiter: Option<RateLimiter>,
    budgets: TokenBudgets,
}

impl AppState {
    pub fn new(
        oracle: Arc<dyn Oracle>,
        keywords: KeywordTable,
        resources: ResourceTable,
        usage: UsageTracker,
        limiter: Option<RateLimiter>,
        budgets: TokenBudgets,
    ) -> Self {
        Self {
            oracle,
            keywords: Arc::new(keywords),
            resources: Arc::new(resources),
            usage,
            limiter,
            budgets,
        }
    }

    async fn complete(
        &self,
        task: &'static str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, AppError> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await?;
        }
        self.oracle
            .complete(prompt, max_tokens)
            .await
            .map_err(|source| AppError::Oracle { task, source })
    }
}

fn require_notes(notes: &str) -> Result<&str, AppError> {
    if notes.trim().is_empty() {
        return Err(AppError::BadRequest("notes must not be empty".to_string()));
    }
    Ok(notes)
}

async fn summarize(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NotesRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let notes = require_notes(&req.notes)?;
    let summary = state
        .complete("summary", &summary_prompt(notes), state.budgets.summary)
        .await?;
    info!(notes_len = notes.len(), summary_len = summary.len(), "summary generated");
    Ok(Json(SummarizeResponse { summary }))
}

async fn generate_quiz(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NotesRequest>,
) -> Result<Json<GenerateQuizResponse>, AppError> {
    let notes = require_notes(&req.notes)?;
    let quiz_raw = state
        .complete("quiz", &quiz_prompt(notes), state.budgets.quiz)
        .await?;
    let quiz = parse_quiz(&quiz_raw, &state.keywords);
    if quiz.is_empty() {
        warn!(raw_len = quiz_raw.len(), "oracle quiz output had no usable questions");
    } else {
        info!(questions = quiz.len(), "quiz generated");
    }
    Ok(Json(GenerateQuizResponse { quiz_raw, quiz }))
}

async fn parse_quiz_text(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ParseQuizRequest>,
) -> Json<ParseQuizResponse> {
    Json(ParseQuizResponse {
        quiz: parse_quiz(&req.quiz_raw, &state.keywords),
    })
}

async fn classify_topic(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ClassifyTopicRequest>,
) -> Json<ClassifyTopicResponse> {
    Json(ClassifyTopicResponse {
        topic: state.keywords.classify(&req.question),
    })
}

async fn analyze_weak_topics(
    ApiJson(req): ApiJson<AnalyzeWeakTopicsRequest>,
) -> Json<AnalyzeWeakTopicsResponse> {
    let weak_topics = analysis::analyze_weak_topics(&req.answers, &req.quiz);
    let stats = analysis::topic_stats(&req.answers, &req.quiz);
    let score = analysis::score(&req.answers, &req.quiz);
    Json(AnalyzeWeakTopicsResponse {
        weak_topics,
        stats: stats
            .into_iter()
            .map(|(topic, stats)| TopicStatsEntry { topic, stats })
            .collect(),
        score,
    })
}

async fn get_study_resources(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<StudyResourcesRequest>,
) -> Json<Vec<StudyPath>> {
    Json(state.resources.study_paths(&req.topics))
}

async fn usage_stats(State(state): State<AppState>) -> Json<UsageStats> {
    Json(state.usage.get_usage_stats().await)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize))
        .route("/api/generate-quiz", post(generate_quiz))
        .route("/api/parse-quiz", post(parse_quiz_text))
        .route("/api/classify-topic", post(classify_topic))
        .route("/api/analyze-weak-topics", post(analyze_weak_topics))
        .route("/api/get-study-resources", post(get_study_resources))
        .route("/api/usage", get(usage_stats))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %addr, "HTTP server ready");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to install ctrl-c handler, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
