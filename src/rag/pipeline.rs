//! Ingestion and query pipelines.
//!
//! Ingestion: validate → keep a copy of the upload → extract from the request
//! bytes → chunk → embed → append to the knowledge base (which persists the
//! snapshot).
//!
//! Query: embed → search → generate.

use crate::db::{KnowledgeBase, KnowledgeBaseStats};
use crate::llm::LLMClient;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::Embedder;
use crate::rag::extract::TextExtractor;
use crate::rag::generator::AnswerGenerator;
use crate::rag::retrieval::Retriever;
use crate::types::{AppError, RagQueryResponse, Result};
use crate::utils::config::RagConfig;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Hex characters of the SHA-256 kept as a document hash.
const DOCUMENT_HASH_LEN: usize = 16;

/// Result of a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Sanitized filename the document was stored and indexed under.
    pub file: String,
    /// Chunks produced from this document.
    pub chunks: usize,
    /// Chunks in the knowledge base after the append.
    pub total_chunks: usize,
    pub document_hash: String,
}

/// Reduce an uploaded filename to a safe, PDF-only basename.
///
/// Client-supplied paths are cut to their last component (either separator),
/// so an upload is always stored directly inside the upload directory. The
/// basename is otherwise kept exactly as sent, whitespace included.
pub fn validate_filename(raw: &str) -> Result<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or("");

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::InvalidInput("A file name is required.".to_string()));
    }
    if !name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::InvalidInput(
            "Only PDF uploads are supported.".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// Short content hash of an uploaded document.
pub fn document_hash(bytes: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    digest[..DOCUMENT_HASH_LEN].to_string()
}

pub struct RagPipeline {
    upload_dir: PathBuf,
    chunker: TextChunker,
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn Embedder>,
    knowledge_base: Arc<KnowledgeBase>,
    retriever: Retriever,
    generator: AnswerGenerator,
}

impl RagPipeline {
    /// Wire the pipeline together.
    ///
    /// Fails if the embedder's dimension does not match the knowledge base,
    /// e.g. a snapshot built with a different model.
    pub fn new(
        config: &RagConfig,
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LLMClient>,
        knowledge_base: Arc<KnowledgeBase>,
    ) -> Result<Self> {
        if embedder.dimensions() != knowledge_base.dimensions() {
            return Err(AppError::Configuration(format!(
                "embedding model {} produces {} dimensions, knowledge base has {}",
                embedder.model_name(),
                embedder.dimensions(),
                knowledge_base.dimensions()
            )));
        }

        Ok(Self {
            upload_dir: config.data_dir.clone(),
            chunker: TextChunker::new(config.chunk_size, config.chunk_overlap)?,
            extractor,
            retriever: Retriever::new(
                Arc::clone(&embedder),
                Arc::clone(&knowledge_base),
                config.top_k,
            ),
            embedder,
            knowledge_base,
            generator: AnswerGenerator::new(llm),
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge_base
    }

    /// Ingest an uploaded document.
    ///
    /// Nothing touches disk or the index until the filename is accepted.
    /// Re-uploading a filename overwrites the stored copy and appends a new
    /// set of chunks; earlier chunks stay in the index. Text always comes
    /// from `bytes`, so the stored copy may already belong to a later upload.
    pub async fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<IngestOutcome> {
        let start = Instant::now();
        let file = validate_filename(filename)?;

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let stored = self.upload_dir.join(&file);
        tokio::fs::write(&stored, bytes).await?;

        let hash = document_hash(bytes);
        if let Some(previous) = self.knowledge_base.latest_document_hash(&file).await {
            if previous != hash {
                warn!(
                    file = %file,
                    previous = %previous,
                    current = %hash,
                    "Re-ingesting a filename with different content; earlier chunks remain indexed"
                );
            }
        }

        let text = self.extractor.extract(bytes).await.map_err(|e| match e {
            AppError::Extraction(msg) => AppError::Extraction(format!("{}: {}", file, msg)),
            other => other,
        })?;
        let chunks = self.chunker.chunk(&text, &file, &hash);
        let texts = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed(texts).await?;

        if vectors.len() != chunks.len() {
            return Err(AppError::Embedding(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            )));
        }

        let chunk_count = chunks.len();
        let total_chunks = self.knowledge_base.append(chunks, vectors).await?;

        info!(
            file = %file,
            chunks = chunk_count,
            total_chunks,
            duration_ms = start.elapsed().as_millis() as u64,
            "Document indexed"
        );

        Ok(IngestOutcome {
            file,
            chunks: chunk_count,
            total_chunks,
            document_hash: hash,
        })
    }

    /// Ingest a PDF from the local filesystem.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestOutcome> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        self.ingest(filename, &bytes).await
    }

    /// Answer a question from the indexed documents.
    ///
    /// An empty knowledge base is not an error: the model is asked with an
    /// empty context and `sources` comes back empty.
    pub async fn query(&self, query: &str) -> Result<RagQueryResponse> {
        let start = Instant::now();
        let retrieved = self.retriever.retrieve(query).await?;

        if retrieved.sources.is_empty() {
            warn!("Knowledge base returned no context; answering without it");
        }

        let answer = self.generator.generate(&retrieved.context, query).await?;

        info!(
            sources = retrieved.sources.len(),
            model = self.generator.model_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Query answered"
        );

        Ok(RagQueryResponse {
            answer,
            sources: retrieved.sources,
        })
    }

    pub async fn stats(&self) -> KnowledgeBaseStats {
        self.knowledge_base.stats().await
    }
}
