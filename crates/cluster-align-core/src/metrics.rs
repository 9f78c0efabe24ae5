//! Distance primitives for clustering and quality metrics.
//!
//! All functions operate on `&[f32]` slices of equal length; batch-level
//! dimensionality is validated at the entry points in
//! [`normalize`](crate::normalize) and [`kmeans`](crate::kmeans).

/// Compute vector magnitude (L2 norm).
#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute squared Euclidean distance between two vectors.
///
/// Uses squared distance to avoid sqrt when only comparisons are needed.
#[inline]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Compute Euclidean distance between two vectors.
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    euclidean_distance_squared(a, b).sqrt()
}

/// Compute cosine distance between two vectors.
///
/// Cosine distance = 1 - cosine_similarity, clamped to `[0, 2]`.
/// Zero-magnitude vectors yield 0.0 rather than NaN.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);

    if mag_a < 1e-10 || mag_b < 1e-10 {
        return 0.0;
    }

    // Clamp similarity first to absorb floating point drift
    let cosine_sim = (dot / (mag_a * mag_b)).clamp(-1.0, 1.0);
    (1.0 - cosine_sim).clamp(0.0, 2.0)
}
