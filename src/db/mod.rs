//! Persistent storage for indexed documents.
//!
//! The knowledge base pairs a [`ragbot_vector::FlatIndex`] with the chunk
//! metadata for each vector and keeps both in a single snapshot file.

pub mod knowledge_base;

pub use knowledge_base::{KnowledgeBase, KnowledgeBaseStats, ScoredChunk};
