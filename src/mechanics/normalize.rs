//! Row-stochastic normalization of strategy matrices.

use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Tolerance for "row sums to one" after explicit normalization.
pub const ROW_SUM_EPS: f64 = 1e-9;

/// Divide every row by its sum.
///
/// A row summing to zero has no meaningful normalization and is reported as
/// [`Error::DegenerateStrategy`] instead of producing NaNs.
pub fn make_row_stochastic(mut matrix: DMatrix<f64>) -> Result<DMatrix<f64>> {
    for r in 0..matrix.nrows() {
        let sum = matrix.row(r).sum();
        if sum <= 0.0 || !sum.is_finite() {
            return Err(Error::DegenerateStrategy { row: r });
        }
        for p in matrix.row_mut(r).iter_mut() {
            *p /= sum;
        }
    }
    Ok(matrix)
}

/// Every row sums to one within `eps` and every entry lies in [0, 1].
pub fn is_row_stochastic(matrix: &DMatrix<f64>, eps: f64) -> bool {
    matrix.row_iter().all(|row| {
        (row.sum() - 1.0).abs() <= eps && row.iter().all(|&p| (-eps..=1.0 + eps).contains(&p))
    })
}

/// Total absolute element-wise change, Σ|a − b|.
#[inline]
pub fn l1_distance(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}
