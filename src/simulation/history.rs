//! Append-only strategy history; the index is the step number.

use crate::strategy::{ReceiverStrategy, SenderStrategy};

#[derive(Clone, Debug, PartialEq)]
pub struct History {
    senders: Vec<SenderStrategy>,
    receivers: Vec<ReceiverStrategy>,
}

impl History {
    /// History seeded with step 0.
    pub fn new(sender: SenderStrategy, receiver: ReceiverStrategy) -> Self {
        Self { senders: vec![sender], receivers: vec![receiver] }
    }

    pub fn push(&mut self, sender: SenderStrategy, receiver: ReceiverStrategy) {
        self.senders.push(sender);
        self.receivers.push(receiver);
    }

    /// Index of the newest entry.
    pub fn current_step(&self) -> usize {
        self.senders.len() - 1
    }

    pub fn sender(&self, step: usize) -> Option<&SenderStrategy> {
        self.senders.get(step)
    }

    pub fn receiver(&self, step: usize) -> Option<&ReceiverStrategy> {
        self.receivers.get(step)
    }

    pub fn current(&self) -> (&SenderStrategy, &ReceiverStrategy) {
        let step = self.current_step();
        (&self.senders[step], &self.receivers[step])
    }

    /// The pair one step before the newest, if any.
    pub fn previous(&self) -> Option<(&SenderStrategy, &ReceiverStrategy)> {
        let step = self.current_step().checked_sub(1)?;
        Some((&self.senders[step], &self.receivers[step]))
    }
}
