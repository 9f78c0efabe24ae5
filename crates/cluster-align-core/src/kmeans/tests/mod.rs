//! Tests for the k-means module.

mod clustering_tests;
pub(crate) mod helpers;
