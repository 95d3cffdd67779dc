//! # RAGBot - PDF question answering server
//!
//! A small retrieval-augmented generation backend. Uploaded PDFs are split
//! into overlapping character windows, embedded locally with a
//! sentence-transformers model, and stored in a flat L2 vector index that is
//! snapshotted to disk after every ingestion. Questions are answered by
//! retrieving the nearest chunks and passing them to an OpenAI-compatible chat
//! completions API (Groq by default).
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use ragbot::{db::KnowledgeBase, rag::RagPipeline, utils::config::Config};
//! use std::sync::Arc;
//!
//! let (config, _source) = Config::load("ragbot.toml", false)?;
//! let kb = Arc::new(KnowledgeBase::open(&config.rag.snapshot_path, 384).await?);
//! let pipeline = RagPipeline::new(&config.rag, extractor, embedder, llm, kb)?;
//!
//! pipeline.ingest_file("manual.pdf".as_ref()).await?;
//! let response = pipeline.query("How do I reset the device?").await?;
//! println!("{} ({:?})", response.answer, response.sources);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-embeddings` | fastembed-backed local embedding model (default) |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`db`] - Knowledge base (vector index + chunk metadata)
//! - [`feedback`] - Feedback sinks
//! - [`llm`] - LLM client implementations
//! - [`rag`] - Extraction, chunking, embedding, retrieval and generation
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Knowledge base storage.
pub mod db;
/// Feedback storage.
pub mod feedback;
/// LLM provider clients and abstractions.
pub mod llm;
/// Retrieval Augmented Generation (RAG) components.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use db::KnowledgeBase;
pub use feedback::FeedbackStore;
pub use llm::LLMClient;
pub use rag::RagPipeline;
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Ingestion and query pipelines
    pub pipeline: Arc<RagPipeline>,
    /// Where feedback goes
    pub feedback: Arc<dyn FeedbackStore>,
}
