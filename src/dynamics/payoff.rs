//! Expected-utility tables the update rules share.

use nalgebra::DMatrix;

use crate::game::Game;
use crate::strategy::{ReceiverStrategy, SenderStrategy};

/// EU(t,m) = Σ_x receiver(m,x)·utility(t,x), shape N×M.
#[inline]
pub fn sender_expected_utility(receiver: &ReceiverStrategy, game: &Game) -> DMatrix<f64> {
    game.utility() * receiver.values().transpose()
}

/// EU(m,x) = Σ_t sender(t,m)·prior(t)·utility(t,x), shape M×A.
///
/// Prior-weighted so that a message only carries the states that actually
/// produce it.
#[inline]
pub fn receiver_expected_utility(sender: &SenderStrategy, game: &Game) -> DMatrix<f64> {
    let priors = game.states().priors();
    let weighted = DMatrix::from_fn(sender.values().nrows(), sender.values().ncols(), |t, m| {
        sender.values()[(t, m)] * priors[t]
    });
    weighted.transpose() * game.utility()
}

/// Σ_{t,m,x} prior(t)·sender(t,m)·receiver(m,x)·utility(t,x).
pub fn expected_utility(sender: &SenderStrategy, receiver: &ReceiverStrategy, game: &Game) -> f64 {
    let eu = sender_expected_utility(receiver, game);
    let priors = game.states().priors();
    (0..eu.nrows())
        .map(|t| priors[t] * sender.values().row(t).dot(&eu.row(t)))
        .sum()
}
