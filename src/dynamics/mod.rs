//! Update rules mapping (sender, receiver, game) to the next strategy pair.
//!
//! Both rules are pure: they read their inputs and return fresh, row
//! normalized strategies. Which rule runs is a closed choice
//! ([`DynamicsKind`]); custom rules can implement [`Dynamics`] directly.

pub mod best_response;
pub mod payoff;
pub mod perception;
pub mod replicator;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::Game;
use crate::specification::Specification;
use crate::strategy::{ReceiverStrategy, SenderStrategy};

pub use perception::Confusion;

/// How the two players take turns within one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOrder {
    /// Both players respond to the previous pair; confusion runs afterwards.
    #[default]
    Simultaneous,
    /// Sender moves and is perceived first; the receiver responds to that
    /// new sender.
    Sequential,
}

pub trait Dynamics {
    fn name(&self) -> &str;

    fn update_sender(
        &self,
        sender: &SenderStrategy,
        receiver: &ReceiverStrategy,
        game: &Game,
    ) -> Result<SenderStrategy>;

    fn update_receiver(
        &self,
        sender: &SenderStrategy,
        receiver: &ReceiverStrategy,
        game: &Game,
    ) -> Result<ReceiverStrategy>;

    /// Simultaneous update: both players respond to the *current* pair.
    fn update(
        &self,
        sender: &SenderStrategy,
        receiver: &ReceiverStrategy,
        game: &Game,
    ) -> Result<(SenderStrategy, ReceiverStrategy)> {
        Ok((
            self.update_sender(sender, receiver, game)?,
            self.update_receiver(sender, receiver, game)?,
        ))
    }

    /// Sequential update: the sender moves (and is blurred by `confusion`),
    /// then the receiver responds to the new sender and is blurred in turn.
    fn update_sequential(
        &self,
        sender: &SenderStrategy,
        receiver: &ReceiverStrategy,
        game: &Game,
        confusion: Option<&Confusion>,
    ) -> Result<(SenderStrategy, ReceiverStrategy)> {
        let mut next_sender = self.update_sender(sender, receiver, game)?;
        if let Some(c) = confusion {
            next_sender = c.apply_sender(&next_sender)?;
        }
        let mut next_receiver = self.update_receiver(&next_sender, receiver, game)?;
        if let Some(c) = confusion {
            next_receiver = c.apply_receiver(&next_receiver)?;
        }
        Ok((next_sender, next_receiver))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicsKind {
    BestResponse,
    Replicator,
}

impl DynamicsKind {
    pub const TABLE: &'static [(&'static str, DynamicsKind)] = &[
        ("best response", DynamicsKind::BestResponse),
        ("replicator", DynamicsKind::Replicator),
    ];

    /// `type` is required.
    pub fn from_spec(spec: &Specification) -> Result<Self> {
        let tag = spec.get_or_fail("type")?;
        Ok(spec.variant(tag.as_str()?, Self::TABLE)?)
    }
}

impl Dynamics for DynamicsKind {
    fn name(&self) -> &str {
        match self {
            DynamicsKind::BestResponse => "best response",
            DynamicsKind::Replicator => "replicator",
        }
    }

    fn update_sender(
        &self,
        sender: &SenderStrategy,
        receiver: &ReceiverStrategy,
        game: &Game,
    ) -> Result<SenderStrategy> {
        match self {
            DynamicsKind::BestResponse => best_response::update_sender(sender, receiver, game),
            DynamicsKind::Replicator => replicator::update_sender(sender, receiver, game),
        }
    }

    fn update_receiver(
        &self,
        sender: &SenderStrategy,
        receiver: &ReceiverStrategy,
        game: &Game,
    ) -> Result<ReceiverStrategy> {
        match self {
            DynamicsKind::BestResponse => best_response::update_receiver(sender, receiver, game),
            DynamicsKind::Replicator => replicator::update_receiver(sender, receiver, game),
        }
    }
}
