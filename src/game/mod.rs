//! The game: spaces plus utility and similarity tables.
//!
//! A [`Game`] is built once and never mutated. The only variant today is
//! *sim-max*: the receiver tries to act on the state the sender observed, so
//! the action space is a copy of the state space and utility equals
//! similarity between true and inferred state.

pub mod factory;
pub mod spaces;

use nalgebra::DMatrix;

use crate::error::{Error, Result};
pub use factory::{GameKind, create_game, create_messages, create_states};
pub use spaces::{ActionSpace, Element, MessageSpace, StateSpace};

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    kind: GameKind,
    states: StateSpace,
    messages: MessageSpace,
    actions: ActionSpace,
    utility: DMatrix<f64>,
    similarity: DMatrix<f64>,
}

impl Game {
    /// Sim-max game: actions = clone of states, utility(t,x) = similarity(t,x).
    ///
    /// `similarity` must be N×N; symmetry is not required.
    pub fn sim_max(
        states: StateSpace,
        messages: MessageSpace,
        similarity: DMatrix<f64>,
    ) -> Result<Self> {
        let n = states.size();
        if similarity.shape() != (n, n) {
            return Err(Error::argument(format!(
                "similarity matrix is {:?}, expected {n}x{n}",
                similarity.shape()
            )));
        }
        if similarity.iter().any(|s| !s.is_finite()) {
            return Err(Error::argument("similarity matrix has non-finite entries"));
        }
        let actions = ActionSpace::from_states(&states);
        Ok(Self {
            kind: GameKind::SimMax,
            states,
            messages,
            actions,
            utility: similarity.clone(),
            similarity,
        })
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn states(&self) -> &StateSpace {
        &self.states
    }

    pub fn messages(&self) -> &MessageSpace {
        &self.messages
    }

    pub fn actions(&self) -> &ActionSpace {
        &self.actions
    }

    /// N×A payoff table: utility(t,x) when the true state is t and action is x.
    pub fn utility(&self) -> &DMatrix<f64> {
        &self.utility
    }

    pub fn similarity(&self) -> &DMatrix<f64> {
        &self.similarity
    }
}
