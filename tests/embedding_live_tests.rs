//! Live embedding tests
//!
//! These load the REAL fastembed model and are **ignored by default**: the
//! first run downloads the ONNX weights (~90MB) and inference needs a fair
//! amount of CPU.
//!
//! # Running the tests
//!
//! ```bash
//! RAG_LIVE_TESTS=1 cargo test --test embedding_live_tests -- --ignored
//!
//! # Reuse an existing model cache
//! RAG_MODEL_CACHE=./.fastembed_cache RAG_LIVE_TESTS=1 cargo test --test embedding_live_tests -- --ignored --nocapture
//! ```

#![cfg(feature = "local-embeddings")]

use ragbot::rag::embeddings::{Embedder, FastEmbedder, LocalModel};
use std::path::PathBuf;
use std::time::Instant;

/// Largest per-component difference tolerated between two runs.
const TOLERANCE: f32 = 1e-5;

fn should_run_live_tests() -> bool {
    std::env::var("RAG_LIVE_TESTS").is_ok()
}

fn model_cache() -> Option<PathBuf> {
    std::env::var("RAG_MODEL_CACHE").ok().map(PathBuf::from)
}

macro_rules! skip_if_not_live {
    () => {
        if !should_run_live_tests() {
            eprintln!("Skipping live test. Set RAG_LIVE_TESTS=1 to run with the real model.");
            return;
        }
    };
}

async fn default_embedder() -> FastEmbedder {
    let start = Instant::now();
    let embedder = FastEmbedder::load(LocalModel::default(), model_cache())
        .await
        .expect("model should load");
    eprintln!(
        "Loaded {} in {:?}",
        embedder.model_name(),
        start.elapsed()
    );
    embedder
}

#[tokio::test]
#[ignore]
async fn test_same_text_embeds_identically() {
    skip_if_not_live!();
    let embedder = default_embedder().await;
    let text = "The ownership system in Rust ensures memory safety at compile time.";

    let first = embedder.embed_one(text).await.unwrap();
    let second = embedder.embed_one(text).await.unwrap();

    assert_eq!(first.len(), second.len());
    let max_diff = first
        .iter()
        .zip(&second)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_diff <= TOLERANCE, "vectors differ by {}", max_diff);
}

#[tokio::test]
#[ignore]
async fn test_empty_batch_returns_no_vectors() {
    skip_if_not_live!();
    let embedder = default_embedder().await;

    let vectors = embedder.embed(Vec::new()).await.unwrap();
    assert!(vectors.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_reported_dimensions_match_output() {
    skip_if_not_live!();
    let embedder = default_embedder().await;
    assert_eq!(embedder.dimensions(), 384);

    let vectors = embedder
        .embed(vec![
            "What is the warranty period?".to_string(),
            "Hold the power button for ten seconds to reset.".to_string(),
        ])
        .await
        .unwrap();

    assert_eq!(vectors.len(), 2);
    for vector in &vectors {
        assert_eq!(vector.len(), embedder.dimensions());
        assert!(vector.iter().all(|v| v.is_finite()));
    }
}
