//! # ragbot-vector
//!
//! A small embedded vector index for RAGBot: exact k-nearest-neighbour search
//! under squared L2 distance, with single-file snapshot persistence.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ragbot_vector::{load_or_create, save_snapshot, Snapshot};
//!
//! # async fn demo() -> ragbot_vector::Result<()> {
//! let path = std::path::Path::new("./data/index.snapshot.json");
//! let mut snapshot: Snapshot<String> = load_or_create(path, 384).await?;
//!
//! snapshot.index.add(&[vec![0.1f32; 384]])?;
//! snapshot.metadata.push("doc.pdf_0".to_string());
//! save_snapshot(path, &snapshot).await?;
//!
//! let hits = snapshot.index.search(&vec![0.1f32; 384], 3)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Alignment
//!
//! The index has no notion of IDs. The i-th vector added is reported as
//! `SearchHit { index: i, .. }`, and a [`Snapshot`] keeps a metadata list
//! whose i-th entry belongs to that vector. Loading and saving both refuse
//! snapshots where the two lengths differ.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod index;
pub mod persistence;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use index::FlatIndex;
pub use persistence::{load_or_create, load_snapshot, save_snapshot, Snapshot};
pub use types::{IndexStats, SearchHit, DEFAULT_K};
