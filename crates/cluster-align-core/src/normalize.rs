//! Batch L2 normalization.

use crate::error::{ClusterError, ClusterResult};
use crate::metrics::magnitude;

/// Validate a batch: non-empty with uniform dimensionality.
///
/// Returns the batch dimensionality.
pub(crate) fn validate_batch(batch: &[Vec<f32>]) -> ClusterResult<usize> {
    let first = batch
        .first()
        .ok_or(ClusterError::EmptyInput("vector batch"))?;
    let dim = first.len();
    if dim == 0 {
        return Err(ClusterError::EmptyInput("zero-dimensional vectors"));
    }
    for row in batch {
        if row.len() != dim {
            return Err(ClusterError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            });
        }
    }
    Ok(dim)
}

/// Scale every vector in the batch to unit L2 norm.
///
/// Output has the same length and dimensionality as the input; order is
/// preserved. A zero vector maps to itself. Pure function.
pub fn normalize(batch: &[Vec<f32>]) -> Vec<Vec<f32>> {
    batch
        .iter()
        .map(|row| {
            let mag = magnitude(row);
            if mag < 1e-10 {
                row.clone()
            } else {
                row.iter().map(|x| x / mag).collect()
            }
        })
        .collect()
}
