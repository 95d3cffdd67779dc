//! Retrieval Augmented Generation (RAG) pipeline
//!
//! # Module Structure
//!
//! - [`extract`] - PDF text extraction
//! - [`chunker`] - Fixed-window text chunking
//! - [`embeddings`] - Dense embedding models (fastembed)
//! - [`retrieval`] - Query embedding and nearest-chunk lookup
//! - [`generator`] - Grounded answer generation via the LLM client
//! - [`pipeline`] - Ingestion and query orchestration
//!
//! # Flow
//!
//! 1. **Ingestion** - Uploaded PDFs are extracted, chunked and embedded
//! 2. **Storage** - Vectors and chunks are appended to the knowledge base
//! 3. **Retrieval** - The query is embedded and the nearest chunks fetched
//! 4. **Generation** - The LLM answers from the retrieved context

pub mod chunker;
pub mod embeddings;
pub mod extract;
pub mod generator;
pub mod pipeline;
pub mod retrieval;

pub use pipeline::{IngestOutcome, RagPipeline};
