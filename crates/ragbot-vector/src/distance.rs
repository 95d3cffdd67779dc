//! Distance function used by the flat index.
//!
//! Only squared Euclidean (L2) distance is supported. Embedding models are not
//! trained for calibrated distances, so callers should treat the value as an
//! ordering key, not as a similarity percentage.

/// Compute the squared Euclidean (L2) distance between two vectors.
///
/// Lower means more similar; identical vectors have distance `0.0`.
#[inline]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let mut sum = 0.0f32;

    // Manual loop unrolling for better performance
    let chunks = a.len() / 4;
    let remainder = a.len() % 4;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];
        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    let start = chunks * 4;
    for i in 0..remainder {
        let idx = start + i;
        let d = a[idx] - b[idx];
        sum += d * d;
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.5, -1.0, 2.0, 3.5, 7.0];
        assert_eq!(squared_l2(&v, &v), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // 3-4-5 triangle: squared distance is 25, not 5
        assert!((squared_l2(&[0.0, 0.0], &[3.0, 4.0]) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_unrolled_and_remainder_paths_agree() {
        let a: Vec<f32> = (0..11).map(|i| i as f32 * 0.5).collect();
        let b: Vec<f32> = (0..11).map(|i| (i as f32).sin()).collect();

        let naive: f32 = a.iter().zip(&b).map(|(x, y)| (x - y) * (x - y)).sum();
        assert!((squared_l2(&a, &b) - naive).abs() < 1e-4);
    }

    #[test]
    fn test_symmetric() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        assert_eq!(squared_l2(&a, &b), squared_l2(&b, &a));
    }
}
