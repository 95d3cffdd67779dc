//! Dense text embeddings.
//!
//! [`Embedder`] is the seam the pipelines depend on. The production backend,
//! [`FastEmbedder`], runs a sentence-transformers model locally through
//! fastembed (ONNX). Inference is CPU-bound, so it runs on the blocking pool
//! behind a mutex; the model is loaded once and shared.

use crate::types::{AppError, Result};
use async_trait::async_trait;
use std::str::FromStr;

/// Maps text to fixed-dimension vectors.
///
/// Implementations must be deterministic for a given model: embedding the
/// same text twice yields the same vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Output dimensionality.
    fn dimensions(&self) -> usize;

    /// Model identifier, for logs and status output.
    fn model_name(&self) -> &str;

    /// Embed a batch of texts, one vector per input in input order.
    /// An empty batch returns an empty list.
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(vec![text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| AppError::Embedding("Embedder returned no vector".to_string()))
    }
}

/// Embedding models that can run locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalModel {
    /// sentence-transformers/all-MiniLM-L6-v2 (384 dims)
    #[default]
    AllMiniLmL6V2,
    /// sentence-transformers/all-MiniLM-L12-v2 (384 dims)
    AllMiniLmL12V2,
    /// BAAI/bge-small-en-v1.5 (384 dims)
    BgeSmallEnV15,
}

impl LocalModel {
    pub fn dimensions(&self) -> usize {
        match self {
            LocalModel::AllMiniLmL6V2 | LocalModel::AllMiniLmL12V2 | LocalModel::BgeSmallEnV15 => {
                384
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocalModel::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            LocalModel::AllMiniLmL12V2 => "sentence-transformers/all-MiniLM-L12-v2",
            LocalModel::BgeSmallEnV15 => "BAAI/bge-small-en-v1.5",
        }
    }

    #[cfg(feature = "local-embeddings")]
    fn to_fastembed_model(self) -> fastembed::EmbeddingModel {
        match self {
            LocalModel::AllMiniLmL6V2 => fastembed::EmbeddingModel::AllMiniLML6V2,
            LocalModel::AllMiniLmL12V2 => fastembed::EmbeddingModel::AllMiniLML12V2,
            LocalModel::BgeSmallEnV15 => fastembed::EmbeddingModel::BGESmallENV15,
        }
    }
}

impl FromStr for LocalModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        // Accept both the full hub name and the bare model name
        let bare = s.rsplit('/').next().unwrap_or(s).to_lowercase();
        match bare.as_str() {
            "all-minilm-l6-v2" => Ok(LocalModel::AllMiniLmL6V2),
            "all-minilm-l12-v2" => Ok(LocalModel::AllMiniLmL12V2),
            "bge-small-en-v1.5" => Ok(LocalModel::BgeSmallEnV15),
            _ => Err(AppError::Configuration(format!(
                "Unsupported embedding model: {}",
                s
            ))),
        }
    }
}

#[cfg(feature = "local-embeddings")]
pub use local::FastEmbedder;

#[cfg(feature = "local-embeddings")]
mod local {
    use super::*;
    use fastembed::{InitOptions, TextEmbedding};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// fastembed-backed [`Embedder`].
    pub struct FastEmbedder {
        model: Arc<Mutex<TextEmbedding>>,
        kind: LocalModel,
    }

    impl FastEmbedder {
        /// Load (downloading on first use) the given model.
        ///
        /// This is slow; call it once at startup and share the result.
        pub async fn load(kind: LocalModel, cache_dir: Option<PathBuf>) -> Result<Self> {
            tracing::info!(model = kind.name(), "Loading embedding model");

            let model = tokio::task::spawn_blocking(move || {
                let mut options =
                    InitOptions::new(kind.to_fastembed_model()).with_show_download_progress(false);
                if let Some(dir) = cache_dir {
                    options = options.with_cache_dir(dir);
                }
                TextEmbedding::try_new(options)
                    .map_err(|e| AppError::Embedding(format!("Failed to load model: {}", e)))
            })
            .await
            .map_err(|e| AppError::Internal(format!("Model load task failed: {}", e)))??;

            Ok(Self {
                model: Arc::new(Mutex::new(model)),
                kind,
            })
        }
    }

    #[async_trait]
    impl Embedder for FastEmbedder {
        fn dimensions(&self) -> usize {
            self.kind.dimensions()
        }

        fn model_name(&self) -> &str {
            self.kind.name()
        }

        async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }

            let model = Arc::clone(&self.model);
            tokio::task::spawn_blocking(move || {
                let mut model = model.blocking_lock();
                model.embed(texts, None)
            })
            .await
            .map_err(|e| AppError::Internal(format!("Embedding task failed: {}", e)))?
            .map_err(|e| AppError::Embedding(e.to_string()))
        }
    }
}
