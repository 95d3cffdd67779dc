//! Flat (exhaustive) L2 index.
//!
//! Vectors are stored contiguously in insertion order. Search scans every
//! vector, which is exact and fast enough for the corpus sizes a single
//! snapshot file can hold.

use crate::distance::squared_l2;
use crate::error::{Error, Result};
use crate::types::{IndexStats, SearchHit};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Exact nearest-neighbour index over fixed-dimension `f32` vectors.
///
/// The i-th vector added is always reported back as `SearchHit { index: i, .. }`,
/// which lets callers keep a parallel metadata list aligned by position.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    /// Vector dimensions.
    dimensions: usize,
    /// Row-major vector storage, `len == count * dimensions`.
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimensions` is zero.
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::Configuration("Dimensions must be > 0".to_string()));
        }

        Ok(Self {
            dimensions,
            data: Vec::new(),
        })
    }

    /// Rebuild an index from row-major storage (used by snapshot loading).
    pub(crate) fn from_flat(dimensions: usize, data: Vec<f32>) -> Result<Self> {
        let mut index = Self::new(dimensions)?;
        if data.len() % dimensions != 0 {
            return Err(Error::Corrupt(format!(
                "vector data length {} is not a multiple of {}",
                data.len(),
                dimensions
            )));
        }
        index.data = data;
        Ok(index)
    }

    /// Get the vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the number of vectors in the index.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimensions
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            vector_count: self.len(),
            dimensions: self.dimensions,
        }
    }

    /// Get the vector stored at `index`.
    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dimensions)?;
        self.data.get(start..start + self.dimensions)
    }

    /// Row-major view of all stored vectors.
    pub(crate) fn as_flat(&self) -> &[f32] {
        &self.data
    }

    /// Append vectors in order.
    ///
    /// The whole batch is validated before anything is stored, so a rejected
    /// batch leaves the index unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if any vector has the wrong dimensionality or holds a
    /// NaN/Inf component.
    pub fn add<V: AsRef<[f32]>>(&mut self, vectors: &[V]) -> Result<()> {
        for vector in vectors {
            self.validate(vector.as_ref())?;
        }

        self.data.reserve(vectors.len() * self.dimensions);
        for vector in vectors {
            self.data.extend_from_slice(vector.as_ref());
        }

        debug!(added = vectors.len(), total = self.len(), "Appended vectors");
        Ok(())
    }

    /// Find the `k` nearest vectors to `query`.
    ///
    /// Results are ordered by ascending distance, ties by insertion order. If
    /// the index holds fewer than `k` vectors, all of them are returned; an
    /// empty index returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query has the wrong dimensionality or holds a
    /// NaN/Inf component.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        self.validate(query)?;

        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = self
            .data
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(index, vector)| SearchHit {
                index,
                distance: squared_l2(query, vector),
            })
            .collect();

        // Partial selection keeps the scan O(n) for small k
        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, compare_hits);
            hits.truncate(k);
        }
        hits.sort_by(compare_hits);

        trace!(k, returned = hits.len(), "Searched flat index");
        Ok(hits)
    }

    fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        if vector.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidVector(
                "Vector contains NaN or Inf".to_string(),
            ));
        }

        Ok(())
    }
}

fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.index.cmp(&b.index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn index_with(vectors: &[Vec<f32>]) -> FlatIndex {
        let mut index = FlatIndex::new(vectors[0].len()).unwrap();
        index.add(vectors).unwrap();
        index
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(FlatIndex::new(0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let index = index_with(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![2.0, 2.0]]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.vector(0), Some(&[1.0, 0.0][..]));
        assert_eq!(index.vector(2), Some(&[2.0, 2.0][..]));
        assert_eq!(index.vector(3), None);
    }

    #[test]
    fn test_add_empty_batch_is_noop() {
        let mut index = FlatIndex::new(4).unwrap();
        index.add::<Vec<f32>>(&[]).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_add_rejects_whole_batch_on_bad_vector() {
        let mut index = FlatIndex::new(2).unwrap();
        let result = index.add(&[vec![1.0, 1.0], vec![1.0, 1.0, 1.0]]);

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(index.is_empty());

        let result = index.add(&[vec![f32::NAN, 0.0]]);
        assert!(matches!(result, Err(Error::InvalidVector(_))));
        assert!(index.is_empty());
    }

    #[test]
    fn test_search_empty_index() {
        let index = FlatIndex::new(3).unwrap();
        let hits = index.search(&[0.0, 0.0, 0.0], 3).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_returns_nearest_first() {
        let index = index_with(&[
            vec![10.0, 10.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
            vec![5.0, 5.0],
        ]);

        let hits = index.search(&[0.1, 0.1], 3).unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert!((hits[0].distance - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_search_fewer_than_k() {
        let index = index_with(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let hits = index.search(&[1.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
    }

    #[test]
    fn test_ties_broken_by_insertion_order() {
        let index = index_with(&[vec![1.0, 0.0], vec![-1.0, 0.0], vec![0.0, 1.0]]);
        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_query_dimension_mismatch() {
        let index = index_with(&[vec![1.0, 0.0]]);
        assert!(matches!(
            index.search(&[1.0], 1),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_search_distances_non_decreasing() {
        let mut rng = rand::rng();
        let vectors: Vec<Vec<f32>> = (0..200)
            .map(|_| (0..16).map(|_| rng.random::<f32>()).collect())
            .collect();
        let index = index_with(&vectors);

        for _ in 0..20 {
            let query: Vec<f32> = (0..16).map(|_| rng.random::<f32>()).collect();
            let hits = index.search(&query, 25).unwrap();
            assert_eq!(hits.len(), 25);
            assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));

            // The selected prefix really is the global top-k
            let full = index.search(&query, vectors.len()).unwrap();
            assert_eq!(&full[..25], &hits[..]);
        }
    }
}
