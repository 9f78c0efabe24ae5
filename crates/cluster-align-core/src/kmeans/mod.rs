//! K-means partitioning of vector batches.
//!
//! # Algorithm
//!
//! 1. Initialize k centroids with seeded k-means++
//! 2. Assign each vector to its nearest centroid (Euclidean distance)
//! 3. Recompute centroids as the mean of assigned vectors
//! 4. Repeat until the largest centroid movement falls below the
//!    tolerance, or max iterations
//!
//! The fit runs `n_init` independent restarts and keeps the run with the
//! lowest inertia. Given a fixed seed the result is fully deterministic.
//!
//! # Fail-fast validation
//!
//! - k must be >= 2 and <= the number of distinct vectors in the batch
//! - the batch must be non-empty with uniform dimensionality
//!
//! Invalid inputs error immediately; no partial results.

mod algorithms;
mod clusterer;
mod config;
#[cfg(test)]
mod tests;

pub use clusterer::{KMeansFit, KMeansPartitioner};
pub use config::KMeansConfig;
