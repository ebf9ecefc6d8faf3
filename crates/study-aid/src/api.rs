use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::model::{AnswerRecord, QuizQuestion, Score, Topic, WeakTopicStats};

/// JSON body extractor whose rejections use the `{"error": ...}` shape.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotesRequest {
    /// Free-form study notes pasted by the user.
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    /// Oracle output, verbatim.
    pub quiz_raw: String,
    /// `quiz_raw` parsed server-side; may be shorter than the raw text suggests.
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseQuizRequest {
    pub quiz_raw: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseQuizResponse {
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyTopicRequest {
    /// Question or note text. Empty text classifies as General.
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyTopicResponse {
    pub topic: Topic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeWeakTopicsRequest {
    /// Question index to chosen option index. Missing entries count as wrong.
    #[serde(default)]
    pub answers: AnswerRecord,
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStatsEntry {
    pub topic: Topic,
    #[serde(flatten)]
    pub stats: WeakTopicStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeWeakTopicsResponse {
    pub weak_topics: Vec<Topic>,
    pub stats: Vec<TopicStatsEntry>,
    pub score: Score,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudyResourcesRequest {
    /// Topic names; matched case-insensitively, unknown names get generic advice.
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
