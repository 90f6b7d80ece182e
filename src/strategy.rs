//! Sender and receiver strategies as row-stochastic matrices.
//!
//! Both wrappers are immutable once built: every update produces a new
//! strategy, which is what lets the simulation history hold them by value.

use bevy_prng::WyRand;
use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::game::{ActionSpace, MessageSpace, StateSpace};
use crate::mechanics::{is_row_stochastic, random_row_stochastic};

/// Row-sum tolerance for strategies supplied by callers.
pub const SUPPLIED_ROW_EPS: f64 = 1e-6;

fn validate(values: &DMatrix<f64>, rows: usize, cols: usize, what: &str) -> Result<()> {
    if values.shape() != (rows, cols) {
        return Err(Error::argument(format!(
            "{what} strategy is {:?}, expected {rows}x{cols}",
            values.shape()
        )));
    }
    if !is_row_stochastic(values, SUPPLIED_ROW_EPS) {
        return Err(Error::argument(format!("{what} strategy is not row-stochastic")));
    }
    Ok(())
}

/// N×M; entry (t,m) = P(send m | state t).
#[derive(Clone, Debug, PartialEq)]
pub struct SenderStrategy {
    values: DMatrix<f64>,
}

impl SenderStrategy {
    pub fn new(states: &StateSpace, messages: &MessageSpace, values: DMatrix<f64>) -> Result<Self> {
        validate(&values, states.size(), messages.size(), "sender")?;
        Ok(Self { values })
    }

    pub fn create_random(
        states: &StateSpace,
        messages: &MessageSpace,
        rng: &mut WyRand,
    ) -> Result<Self> {
        Ok(Self { values: random_row_stochastic(states.size(), messages.size(), rng)? })
    }

    /// Wrap an already normalized matrix produced inside the crate.
    pub(crate) fn from_normalized(values: DMatrix<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn into_values(self) -> DMatrix<f64> {
        self.values
    }
}

/// M×A; entry (m,x) = P(act x | message m).
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiverStrategy {
    values: DMatrix<f64>,
}

impl ReceiverStrategy {
    pub fn new(
        messages: &MessageSpace,
        actions: &ActionSpace,
        values: DMatrix<f64>,
    ) -> Result<Self> {
        validate(&values, messages.size(), actions.size(), "receiver")?;
        Ok(Self { values })
    }

    pub fn create_random(
        messages: &MessageSpace,
        actions: &ActionSpace,
        rng: &mut WyRand,
    ) -> Result<Self> {
        Ok(Self { values: random_row_stochastic(messages.size(), actions.size(), rng)? })
    }

    pub(crate) fn from_normalized(values: DMatrix<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn into_values(self) -> DMatrix<f64> {
        self.values
    }
}
