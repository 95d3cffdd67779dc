//! RAG API handlers.
//!
//! - Document ingestion (multipart PDF upload)
//! - Question answering over the indexed documents
//! - Knowledge base statistics

use crate::{
    types::{
        AppError, IngestResponse, RagQueryRequest, RagQueryResponse, Result, StatsResponse,
    },
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Upload and index a PDF
///
/// Accepts `multipart/form-data` with the document in a `file` field. If no
/// field has that name, the first field carrying a file name is used.
#[utoipa::path(
    post,
    path = "/api/ingest",
    responses(
        (status = 200, description = "Document indexed", body = IngestResponse),
        (status = 400, description = "Missing file or not a PDF"),
        (status = 500, description = "Internal server error")
    ),
    tag = "rag"
)]
pub async fn ingest(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {}", e)))?
    {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {}", e)))?;

        if is_file_field {
            upload = Some((filename, bytes));
            break;
        }
        if upload.is_none() {
            upload = Some((filename, bytes));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::InvalidInput("No file uploaded.".to_string()))?;

    tracing::debug!(filename = %filename, bytes = bytes.len(), "Received upload");

    let outcome = state.pipeline.ingest(&filename, &bytes).await?;
    Ok(Json(IngestResponse::indexed(outcome.file, outcome.chunks)))
}

/// Answer a question from the indexed documents
#[utoipa::path(
    post,
    path = "/api/rag-query",
    request_body = RagQueryRequest,
    responses(
        (status = 200, description = "Answer generated", body = RagQueryResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error"),
        (status = 502, description = "LLM service error")
    ),
    tag = "rag"
)]
pub async fn rag_query(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RagQueryRequest>, JsonRejection>,
) -> Result<Json<RagQueryResponse>> {
    let Json(payload) = payload.map_err(invalid_json)?;
    let response = state.pipeline.query(&payload.query).await?;
    Ok(Json(response))
}

/// Body rejections become 400s with the usual error envelope.
pub(crate) fn invalid_json(rejection: JsonRejection) -> AppError {
    AppError::InvalidInput(rejection.body_text())
}

/// Knowledge base statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Current counters", body = StatsResponse)
    ),
    tag = "rag"
)]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.pipeline.stats().await;
    Json(StatsResponse {
        chunks: stats.chunks,
        vectors: stats.vectors,
        dimensions: stats.dimensions,
        sources: stats.sources,
    })
}
