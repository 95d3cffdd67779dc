//! HTTP API Handlers and Routes
//!
//! # API Endpoints
//!
//! - `POST /api/ingest` - Upload a PDF (multipart, field `file`) and index it
//! - `POST /api/rag-query` - Answer `{"query"}` from the indexed documents
//! - `POST /api/feedback` - Record feedback on an answer
//! - `GET /api/stats` - Knowledge base counters
//! - `GET /healthz` - Liveness probe
//!
//! Errors are returned as `{"error": "..."}`. Server-side failures carry a
//! generic message; the detail goes to the log.
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{
    FeedbackRequest, FeedbackType, IngestResponse, RagQueryRequest, RagQueryResponse,
    StatsResponse, StatusResponse,
};
use crate::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "RAGBot API", description = "PDF ingestion and retrieval-augmented question answering"),
    paths(
        handlers::rag::ingest,
        handlers::rag::rag_query,
        handlers::rag::stats,
        handlers::feedback::submit_feedback,
        handlers::health::healthz,
    ),
    components(schemas(
        IngestResponse,
        RagQueryRequest,
        RagQueryResponse,
        FeedbackRequest,
        FeedbackType,
        StatusResponse,
        StatsResponse,
    )),
    tags(
        (name = "rag", description = "Document ingestion and question answering"),
        (name = "feedback", description = "Answer feedback"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", routes::create_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
