//! Helper functions for creating deterministic test batches.

/// Create a 4-dimensional vector dominated by one axis, with a small
/// index-dependent perturbation so vectors within a group are distinct.
pub(crate) fn axis_vector(axis: usize, i: usize) -> Vec<f32> {
    let mut v = vec![0.1f32; 4];
    v[axis] = 1.0 + i as f32 * 0.01;
    v
}

/// Create a batch forming three direction-separated groups of five
/// vectors each. Group g points along axis g, so the groups stay
/// separated after L2 normalization.
pub(crate) fn three_group_batch() -> Vec<Vec<f32>> {
    let mut batch = Vec::new();
    for axis in 0..3 {
        for i in 0..5 {
            batch.push(axis_vector(axis, i));
        }
    }
    batch
}

/// Create a batch of two tight axis-aligned groups.
pub(crate) fn two_axis_batch() -> Vec<Vec<f32>> {
    vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
    ]
}
