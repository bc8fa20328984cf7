//! Distance functions for similarity ranking.
//!
//! Cosine distance is the only metric the collection ranks by; the helpers
//! are shared with the embedding implementations.

use super::types::Embedding;

/// Cosine distance: 1 - cosine_similarity
/// Range: [0, 2], where 0 = identical direction, 2 = opposite
#[inline]
pub fn cosine_distance(a: &Embedding, b: &Embedding) -> f32 {
    let dot = dot_product(a, b);
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0; // Undefined, return neutral distance
    }

    let similarity = dot / (norm_a * norm_b);
    // Clamp to handle floating point errors
    1.0 - similarity.clamp(-1.0, 1.0)
}

/// Cosine similarity: dot(a, b) / (||a|| * ||b||)
/// Range: [-1, 1], where 1 = identical, -1 = opposite
#[inline]
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> f32 {
    1.0 - cosine_distance(a, b)
}

/// Dot product of two vectors
#[inline]
pub fn dot_product(a: &Embedding, b: &Embedding) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm (magnitude) of a vector
#[inline]
pub fn norm(v: &Embedding) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize a vector to unit length
pub fn normalize(v: &mut Embedding) {
    let n = norm(v);
    if n > 0.0 {
        for x in v.iter_mut() {
            *x /= n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_distance(&a, &b) - 0.0).abs() < 1e-6);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_distance(&a, &c) - 1.0).abs() < 1e-6);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_distance(&a, &d) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_zero_norm() {
        let zero = vec![0.0, 0.0, 0.0];
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_distance(&zero, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_magnitude_invariant() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        assert!(cosine_distance(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((norm(&v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }
}
