use crate::api::handlers::{feedback, rag};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes mounted under `/api`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(rag::ingest))
        .route("/rag-query", post(rag::rag_query))
        .route("/stats", get(rag::stats))
        .route("/feedback", post(feedback::submit_feedback))
}
