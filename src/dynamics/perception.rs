//! Limited perception: perceptually close states get partially conflated.
//!
//! sender ← C · sender and receiver ← receiver · Cᵗ, each followed by
//! row normalization.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::game::StateSpace;
use crate::mechanics::{create_nosofsky, make_row_stochastic};
use crate::strategy::{ReceiverStrategy, SenderStrategy};

#[derive(Clone, Debug, PartialEq)]
pub struct Confusion {
    matrix: DMatrix<f64>,
}

impl Confusion {
    /// Square, non-negative confusion matrix.
    pub fn new(matrix: DMatrix<f64>) -> Result<Self> {
        if !matrix.is_square() {
            return Err(Error::argument(format!(
                "confusion matrix is {:?}, expected square",
                matrix.shape()
            )));
        }
        if matrix.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(Error::argument("confusion matrix must be finite and non-negative"));
        }
        Ok(Self { matrix })
    }

    /// exp(-(d·acuity)²) over the state distances.
    pub fn from_acuity(states: &StateSpace, acuity: f64) -> Result<Self> {
        if !(acuity.is_finite() && acuity > 0.0) {
            return Err(Error::argument(format!("acuity must be positive, got {acuity}")));
        }
        let distances = states
            .distances()
            .ok_or_else(|| Error::argument("limited perception needs a metric on states"))?;
        Self::new(create_nosofsky(distances, 1.0 / acuity))
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn apply_sender(&self, sender: &SenderStrategy) -> Result<SenderStrategy> {
        make_row_stochastic(&self.matrix * sender.values()).map(SenderStrategy::from_normalized)
    }

    pub fn apply_receiver(&self, receiver: &ReceiverStrategy) -> Result<ReceiverStrategy> {
        make_row_stochastic(receiver.values() * self.matrix.transpose())
            .map(ReceiverStrategy::from_normalized)
    }
}
