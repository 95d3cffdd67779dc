//! API request handlers.

/// Feedback submission handler.
pub mod feedback;
/// Health check handler.
pub mod health;
/// Ingestion, query and stats handlers.
pub mod rag;
