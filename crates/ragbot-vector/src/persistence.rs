//! Persistence layer for ragbot-vector.
//!
//! A snapshot is one JSON file holding the index dimensions, every vector in
//! insertion order, and a caller-defined metadata list aligned with it:
//!
//! ```text
//! { "version": 1, "dimensions": 384, "vectors": [..], "metadata": [..] }
//! ```
//!
//! Snapshots are rewritten wholesale. Writes go to a sibling temp file that is
//! renamed over the target, so readers never observe a half-written snapshot.

use crate::error::{Error, Result};
use crate::index::FlatIndex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a, M> {
    version: u32,
    dimensions: usize,
    vectors: &'a [f32],
    metadata: &'a [M],
}

#[derive(Deserialize)]
struct StoredSnapshot<M> {
    version: u32,
    dimensions: usize,
    vectors: Vec<f32>,
    metadata: Vec<M>,
}

/// An index paired 1:1 with its metadata.
///
/// `index.len() == metadata.len()` holds for every value produced by this
/// module.
#[derive(Debug, Clone)]
pub struct Snapshot<M> {
    /// The vector index.
    pub index: FlatIndex,
    /// Metadata, where `metadata[i]` describes vector `i`.
    pub metadata: Vec<M>,
}

impl<M> Snapshot<M> {
    /// Create an empty snapshot for vectors of the given dimensionality.
    pub fn empty(dimensions: usize) -> Result<Self> {
        Ok(Self {
            index: FlatIndex::new(dimensions)?,
            metadata: Vec::new(),
        })
    }

    /// Check that the vector count matches the metadata count.
    pub fn check_aligned(&self) -> Result<()> {
        if self.index.len() != self.metadata.len() {
            return Err(Error::Corrupt(format!(
                "{} vectors but {} metadata entries",
                self.index.len(),
                self.metadata.len()
            )));
        }
        Ok(())
    }
}

/// Save a snapshot to `path`, replacing any previous file.
///
/// # Errors
///
/// Refuses to write a misaligned snapshot; otherwise fails only on
/// serialization or I/O errors.
pub async fn save_snapshot<M: Serialize>(path: &Path, snapshot: &Snapshot<M>) -> Result<()> {
    snapshot.check_aligned()?;

    let body = serde_json::to_vec(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        dimensions: snapshot.index.dimensions(),
        vectors: snapshot.index.as_flat(),
        metadata: &snapshot.metadata,
    })
    .map_err(|e| Error::Persistence(format!("Failed to serialize snapshot: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp_path = temp_path(path);
    let mut file = tokio::fs::File::create(&tmp_path).await?;
    file.write_all(&body).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(&tmp_path, path).await?;

    info!(
        path = %path.display(),
        vectors = snapshot.index.len(),
        bytes = body.len(),
        "Saved snapshot"
    );
    Ok(())
}

/// Load a snapshot from `path`.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns [`Error::Corrupt`] if the file parses but violates the snapshot
/// invariants, and [`Error::Persistence`] if it does not parse at all.
pub async fn load_snapshot<M: DeserializeOwned>(path: &Path) -> Result<Option<Snapshot<M>>> {
    let body = match tokio::fs::read(path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let stored: StoredSnapshot<M> = serde_json::from_slice(&body)
        .map_err(|e| Error::Persistence(format!("Failed to parse snapshot: {}", e)))?;

    if stored.version != SNAPSHOT_VERSION {
        return Err(Error::Persistence(format!(
            "Unsupported snapshot version {}",
            stored.version
        )));
    }

    let snapshot = Snapshot {
        index: FlatIndex::from_flat(stored.dimensions, stored.vectors)?,
        metadata: stored.metadata,
    };
    snapshot.check_aligned()?;

    debug!(path = %path.display(), vectors = snapshot.index.len(), "Loaded snapshot");
    Ok(Some(snapshot))
}

/// Load the snapshot at `path`, or start an empty one if none exists.
///
/// # Errors
///
/// Besides load errors, fails if an existing snapshot was built for a
/// different dimensionality than `dimensions`.
pub async fn load_or_create<M: DeserializeOwned>(
    path: &Path,
    dimensions: usize,
) -> Result<Snapshot<M>> {
    match load_snapshot(path).await? {
        Some(snapshot) => {
            if snapshot.index.dimensions() != dimensions {
                return Err(Error::Configuration(format!(
                    "snapshot at {} has {} dimensions, embedder produces {}",
                    path.display(),
                    snapshot.index.dimensions(),
                    dimensions
                )));
            }
            info!(
                path = %path.display(),
                vectors = snapshot.index.len(),
                "Loaded existing snapshot"
            );
            Ok(snapshot)
        }
        None => {
            info!(path = %path.display(), dimensions, "No snapshot found, starting empty");
            Snapshot::empty(dimensions)
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "snapshot".into());
    name.push(".tmp");
    path.with_file_name(name)
}
