use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RagQueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RagQueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    /// Always `"indexed"` on success.
    pub status: String,
    pub file: String,
    pub chunks: usize,
}

impl IngestResponse {
    pub fn indexed(file: String, chunks: usize) -> Self {
        Self {
            status: "indexed".to_string(),
            file,
            chunks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub message_id: String,
    pub user_id: String,
    pub feedback_type: FeedbackType,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub chunks: usize,
    pub vectors: usize,
    pub dimensions: usize,
    /// Distinct source files, in first-ingested order.
    pub sources: Vec<String>,
}

// ============= RAG Types =============

/// One window of extracted document text, the unit of embedding and retrieval.
///
/// Chunks are created once during ingestion and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// `"{filename}_{offset}"`, unique within one source file.
    pub id: String,
    pub text: String,
    /// Originating filename.
    pub source: String,
    /// Short content hash of the uploaded file the chunk came from.
    #[serde(default)]
    pub document_hash: String,
}

/// A feedback entry as handed to a [`FeedbackStore`](crate::feedback::FeedbackStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub message_id: String,
    pub user_id: String,
    pub feedback_type: FeedbackType,
    pub comments: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl From<FeedbackRequest> for FeedbackRecord {
    fn from(req: FeedbackRequest) -> Self {
        Self {
            message_id: req.message_id,
            user_id: req.user_id,
            feedback_type: req.feedback_type,
            comments: req.comments,
            received_at: Utc::now(),
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upstream LLM error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Extraction(_)
            | AppError::Embedding(_)
            | AppError::Storage(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API callers. Server-side failures never leak
    /// their internal detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Upstream(_) => "LLM service error".to_string(),
            AppError::Extraction(_) => "Could not extract text from document".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<ragbot_vector::Error> for AppError {
    fn from(e: ragbot_vector::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.public_message()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
