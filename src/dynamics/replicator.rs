//! Discrete replicator dynamics.
//!
//! w(i,j) = strategy(i,j) · EU(i,j), then row-normalize. A row whose total
//! fitness is zero (a message no state sends, say) feels no selection
//! pressure and is carried over unchanged.

use nalgebra::DMatrix;

use crate::dynamics::payoff::{receiver_expected_utility, sender_expected_utility};
use crate::error::{Error, Result};
use crate::game::Game;
use crate::mechanics::make_row_stochastic;
use crate::strategy::{ReceiverStrategy, SenderStrategy};

/// Fitness-proportional reallocation of each row of `strategy`.
pub fn replicate(strategy: &DMatrix<f64>, fitness: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if fitness.iter().any(|f| *f < 0.0) {
        return Err(Error::argument("replicator dynamics needs non-negative utilities"));
    }
    let mut weights = strategy.component_mul(fitness);
    for r in 0..weights.nrows() {
        if weights.row(r).sum() == 0.0 {
            weights.set_row(r, &strategy.row(r));
        }
    }
    make_row_stochastic(weights)
}

pub fn update_sender(
    sender: &SenderStrategy,
    receiver: &ReceiverStrategy,
    game: &Game,
) -> Result<SenderStrategy> {
    let eu = sender_expected_utility(receiver, game);
    replicate(sender.values(), &eu).map(SenderStrategy::from_normalized)
}

pub fn update_receiver(
    sender: &SenderStrategy,
    receiver: &ReceiverStrategy,
    game: &Game,
) -> Result<ReceiverStrategy> {
    let eu = receiver_expected_utility(sender, game);
    replicate(receiver.values(), &eu).map(ReceiverStrategy::from_normalized)
}
