//! Best-response dynamics.
//!
//! Each row jumps straight to the message (or action) with the highest
//! expected utility against the other player's current strategy. Ties split
//! the mass uniformly across every maximizer.

use nalgebra::DMatrix;

use crate::dynamics::payoff::{receiver_expected_utility, sender_expected_utility};
use crate::error::Result;
use crate::game::Game;
use crate::strategy::{ReceiverStrategy, SenderStrategy};

/// Relative slack under which two expected utilities count as tied.
pub const TIE_EPS: f64 = 1e-12;

/// Row-wise argmax with uniform tie split.
pub fn best_response_rows(eu: &DMatrix<f64>) -> DMatrix<f64> {
    let mut out = DMatrix::zeros(eu.nrows(), eu.ncols());
    for r in 0..eu.nrows() {
        let row = eu.row(r);
        let best = row.max();
        let slack = TIE_EPS * best.abs().max(1.0);
        let winners: Vec<usize> = (0..row.len()).filter(|&c| best - row[c] <= slack).collect();
        let share = 1.0 / winners.len() as f64;
        for c in winners {
            out[(r, c)] = share;
        }
    }
    out
}

pub fn update_sender(
    _sender: &SenderStrategy,
    receiver: &ReceiverStrategy,
    game: &Game,
) -> Result<SenderStrategy> {
    let eu = sender_expected_utility(receiver, game);
    Ok(SenderStrategy::from_normalized(best_response_rows(&eu)))
}

pub fn update_receiver(
    sender: &SenderStrategy,
    _receiver: &ReceiverStrategy,
    game: &Game,
) -> Result<ReceiverStrategy> {
    let eu = receiver_expected_utility(sender, game);
    Ok(ReceiverStrategy::from_normalized(best_response_rows(&eu)))
}
