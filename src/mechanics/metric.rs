//! Pairwise distances over numeric space elements.

use nalgebra::DMatrix;

/// Euclidean (here: absolute difference) distance between 1-D points.
#[inline]
pub fn euclidean(points: &[f64]) -> DMatrix<f64> {
    let n = points.len();
    DMatrix::from_fn(n, n, |i, j| (points[i] - points[j]).abs())
}
