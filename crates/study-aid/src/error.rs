use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use study_common::openai::OpenAiClientError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    RateLimited(String),

    /// The oracle call failed or timed out. `task` names what was being generated.
    #[error("failed to generate {task}: {source}")]
    Oracle {
        task: &'static str,
        #[source]
        source: OpenAiClientError,
    },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Oracle { task, source } => {
                error!(task, timeout = source.is_timeout(), error = %source, "oracle call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate {task}."),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RateLimited(msg) => {
                warn!(error = %msg, "request rate limited");
                (StatusCode::TOO_MANY_REQUESTS, msg.clone())
            }
            AppError::Config(msg) => {
                error!(error = %msg, "configuration error while serving");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
