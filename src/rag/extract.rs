//! Plain-text extraction from uploaded documents.

use crate::types::{AppError, Result};
use async_trait::async_trait;

/// Turns an uploaded document into plain text.
///
/// Extraction works on the upload's own bytes, never on the stored copy, so
/// concurrent uploads sharing a filename each index what they sent.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// PDF text extraction backed by the `pdf-extract` crate.
///
/// Parsing is CPU-bound and can panic on some malformed files, so it runs on
/// the blocking pool; a panic surfaces as an extraction error rather than
/// taking the worker down.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.to_vec();
        let size = bytes.len();

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| AppError::Extraction(format!("parser aborted: {}", e)))?
            .map_err(|e| AppError::Extraction(e.to_string()))?;

        tracing::debug!(bytes = size, chars = text.chars().count(), "Extracted text");
        Ok(text)
    }
}
