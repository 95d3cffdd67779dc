//! Mock implementations for testing.
//!
//! Stand-ins for the embedding model, the PDF extractor and the LLM so the
//! HTTP layer and pipelines can be exercised without model downloads, real
//! PDFs or network access.

#![allow(dead_code)]

use async_trait::async_trait;
use ragbot::llm::LLMClient;
use ragbot::rag::embeddings::Embedder;
use ragbot::rag::extract::TextExtractor;
use ragbot::types::{AppError, Result};
use std::sync::{Arc, Mutex};

/// Dimension of [`MockEmbedder`] vectors.
pub const MOCK_DIMENSIONS: usize = 16;

/// Deterministic bag-of-characters embedder.
///
/// Texts with similar character distributions land close together, which is
/// enough to make retrieval order predictable in tests.
#[derive(Clone, Default)]
pub struct MockEmbedder;

impl MockEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0; MOCK_DIMENSIONS];
        for c in text.chars() {
            v[c as usize % MOCK_DIMENSIONS] += 1.0;
        }
        let len = text.chars().count().max(1) as f32;
        v.iter_mut().for_each(|x| *x /= len);
        v
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn dimensions(&self) -> usize {
        MOCK_DIMENSIONS
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }

    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

/// Extractor that ignores the upload and returns fixed text.
#[derive(Clone)]
pub struct MockExtractor {
    text: String,
    should_fail: bool,
}

impl MockExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            should_fail: false,
        }
    }

    /// An extractor that behaves like a parser hitting a corrupt PDF.
    pub fn failing() -> Self {
        Self {
            text: String::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        if self.should_fail {
            return Err(AppError::Extraction(format!(
                "mock parse failure on {} bytes",
                bytes.len()
            )));
        }
        Ok(self.text.clone())
    }
}

/// Mock LLM client with a canned answer that records every call.
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client whose provider always answers with an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// `(system, prompt)` pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));

        if self.should_fail {
            return Err(AppError::Upstream("provider returned 500".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
