//! Process-wide knowledge base: the vector index plus its chunk list.
//!
//! # Lifecycle
//!
//! 1. [`KnowledgeBase::open`] loads the snapshot at startup, or starts empty
//!    with the embedder's dimensionality.
//! 2. Ingestion calls [`KnowledgeBase::append`], which extends the index and
//!    the chunk list and rewrites the snapshot file.
//! 3. Queries call [`KnowledgeBase::search`].
//!
//! Both halves live behind one `RwLock`. `append` holds the write lock from the
//! in-memory append through the snapshot write, so concurrent ingestions are
//! serialized and `vectors == chunks` holds at every observable point.

use crate::rag::embeddings::LocalModel;
use crate::types::{AppError, DocumentChunk, Result};
use crate::utils::config::RagConfig;
use ragbot_vector::{load_or_create, save_snapshot, Snapshot};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{error, info};

/// A chunk returned by a search, with its squared L2 distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub distance: f32,
}

/// Point-in-time counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeBaseStats {
    pub chunks: usize,
    pub vectors: usize,
    pub dimensions: usize,
    pub sources: Vec<String>,
}

pub struct KnowledgeBase {
    snapshot_path: PathBuf,
    dimensions: usize,
    state: RwLock<Snapshot<DocumentChunk>>,
}

impl KnowledgeBase {
    /// Load the snapshot at `snapshot_path`, or start empty.
    pub async fn open(snapshot_path: impl Into<PathBuf>, dimensions: usize) -> Result<Self> {
        let snapshot_path = snapshot_path.into();
        let snapshot = load_or_create(&snapshot_path, dimensions).await?;

        Ok(Self {
            snapshot_path,
            dimensions,
            state: RwLock::new(snapshot),
        })
    }

    /// Open the knowledge base described by `config`.
    ///
    /// The dimensionality comes from the configured model's name, so this
    /// never loads the model itself.
    pub async fn from_config(config: &RagConfig) -> Result<Self> {
        let model: LocalModel = config.embedding_model.parse()?;
        Self::open(&config.snapshot_path, model.dimensions()).await
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Append chunks with their embeddings and persist the snapshot.
    ///
    /// Returns the total number of chunks afterwards. If the snapshot write
    /// fails, the in-memory state keeps the new chunks and the next successful
    /// append persists them.
    pub async fn append(&self, chunks: Vec<DocumentChunk>, vectors: Vec<Vec<f32>>) -> Result<usize> {
        if chunks.len() != vectors.len() {
            return Err(AppError::Internal(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                vectors.len()
            )));
        }

        let mut state = self.state.write().await;

        // Index first: it validates the whole batch, so a rejected batch
        // leaves both halves untouched.
        state.index.add(&vectors)?;
        state.metadata.extend(chunks);
        let total = state.metadata.len();

        if let Err(e) = save_snapshot(&self.snapshot_path, &*state).await {
            error!(
                path = %self.snapshot_path.display(),
                error = %e,
                "Snapshot write failed; in-memory index is ahead of disk"
            );
            return Err(e.into());
        }

        info!(added = vectors.len(), total, "Knowledge base updated");
        Ok(total)
    }

    /// The `k` chunks closest to `query`, nearest first.
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let state = self.state.read().await;
        let hits = state.index.search(query, k)?;

        hits.into_iter()
            .map(|hit| {
                state
                    .metadata
                    .get(hit.index)
                    .map(|chunk| ScoredChunk {
                        chunk: chunk.clone(),
                        distance: hit.distance,
                    })
                    .ok_or_else(|| {
                        AppError::Storage(format!("no chunk for vector {}", hit.index))
                    })
            })
            .collect()
    }

    /// Hash of the most recent upload ingested under `source`, if any.
    pub async fn latest_document_hash(&self, source: &str) -> Option<String> {
        let state = self.state.read().await;
        state
            .metadata
            .iter()
            .rev()
            .find(|c| c.source == source)
            .map(|c| c.document_hash.clone())
    }

    pub async fn stats(&self) -> KnowledgeBaseStats {
        let state = self.state.read().await;
        let mut seen = HashSet::new();
        let sources = state
            .metadata
            .iter()
            .filter(|c| seen.insert(c.source.as_str()))
            .map(|c| c.source.clone())
            .collect();

        KnowledgeBaseStats {
            chunks: state.metadata.len(),
            vectors: state.index.len(),
            dimensions: state.index.dimensions(),
            sources,
        }
    }
}
