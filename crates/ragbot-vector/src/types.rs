//! Common types for ragbot-vector.

use serde::{Deserialize, Serialize};

/// Default number of neighbours returned by a search.
pub const DEFAULT_K: usize = 3;

/// A single nearest-neighbour hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the vector in insertion order. Pairs 1:1 with the
    /// caller's metadata sequence.
    pub index: usize,
    /// Squared L2 distance to the query (lower is closer).
    pub distance: f32,
}

/// Summary of an index, suitable for status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of stored vectors.
    pub vector_count: usize,
    /// Dimensionality of every stored vector.
    pub dimensions: usize,
}
