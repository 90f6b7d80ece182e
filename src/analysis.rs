//! Is the final language a *proper vague language*?
//!
//! Four checks on a converged strategy pair, relative to a similarity over
//! states (usually the perception/confusion similarity):
//!
//! 1. each receiver row has a unique maximal action,
//! 2. those prototypes are pairwise distinct,
//! 3. receiver rows fall off with similarity to their prototype,
//! 4. senders prefer messages whose prototype is more similar to the state.
//!
//! Checks 3 and 4 allow [`SLACK`] of numeric noise.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::strategy::{ReceiverStrategy, SenderStrategy};

pub const SLACK: f64 = 0.01;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaguenessReport {
    /// Argmax action per message (first maximizer).
    pub prototypes: Vec<usize>,
    pub unique_maxima: bool,
    pub distinct_prototypes: bool,
    pub receiver_monotone: bool,
    pub sender_monotone: bool,
}

impl VaguenessReport {
    pub fn is_proper(&self) -> bool {
        self.unique_maxima
            && self.distinct_prototypes
            && self.receiver_monotone
            && self.sender_monotone
    }
}

fn first_argmax<'a>(values: impl Iterator<Item = &'a f64>) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best.0
}

/// `a` beats `b`, or loses by less than [`SLACK`].
#[inline]
fn not_worse(a: f64, b: f64) -> bool {
    a > b || b - a < SLACK
}

/// Judge `sender`/`receiver` against `similarity`, which must be square over
/// the states, and states and actions must coincide.
pub fn assess(
    similarity: &DMatrix<f64>,
    sender: &SenderStrategy,
    receiver: &ReceiverStrategy,
) -> Result<VaguenessReport> {
    let s = sender.values();
    let r = receiver.values();
    let (n_states, n_messages) = s.shape();
    let n_actions = r.ncols();
    if n_actions != n_states || similarity.shape() != (n_states, n_states) {
        return Err(Error::argument(format!(
            "similarity is {:?}, expected {n_states}x{n_states} over {n_actions} actions",
            similarity.shape()
        )));
    }

    let unique_maxima = r.row_iter().all(|row| {
        let max = row.max();
        row.iter().filter(|&&v| v == max).count() == 1
    });

    let prototypes: Vec<usize> = r.row_iter().map(|row| first_argmax(row.iter())).collect();

    let distinct_prototypes = prototypes
        .iter()
        .enumerate()
        .all(|(i, p)| prototypes[i + 1..].iter().all(|q| q != p));

    let receiver_monotone = prototypes.iter().enumerate().all(|(m, &p)| {
        (0..n_actions).all(|t1| {
            (0..n_actions).all(|t2| {
                similarity[(t1, p)] <= similarity[(t2, p)] || not_worse(r[(m, t1)], r[(m, t2)])
            })
        })
    });

    let sender_monotone = (0..n_states).all(|t| {
        (0..n_messages).all(|m1| {
            (0..n_messages).all(|m2| {
                similarity[(t, prototypes[m1])] <= similarity[(t, prototypes[m2])]
                    || not_worse(s[(t, m1)], s[(t, m2)])
            })
        })
    });

    Ok(VaguenessReport {
        prototypes,
        unique_maxima,
        distinct_prototypes,
        receiver_monotone,
        sender_monotone,
    })
}
