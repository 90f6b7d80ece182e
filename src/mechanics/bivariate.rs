//! Bivariate functions over a finite space: similarity and utility tables.

use nalgebra::DMatrix;

/// Kronecker delta: similarity 1 on the diagonal, 0 elsewhere.
#[inline]
pub fn create_identity(n: usize) -> DMatrix<f64> {
    DMatrix::identity(n, n)
}

/// Nosofsky exponential decay: sim(i,j) = exp(-(d(i,j) / c)²).
///
/// `decay` acts as a length scale: at distance `c` similarity has fallen to
/// 1/e. Expects a symmetric, non-negative distance matrix with zero diagonal,
/// which gives a symmetric result with unit diagonal, strictly decreasing in
/// distance.
#[inline]
pub fn create_nosofsky(distances: &DMatrix<f64>, decay: f64) -> DMatrix<f64> {
    distances.map(|d| (-(d / decay).powi(2)).exp())
}
