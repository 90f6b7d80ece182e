//! Simulation driver.
//!
//! Owns the history, advances one step at a time and runs until the
//! strategies stabilize or the step budget runs out:
//!
//! ```text
//! INITIALIZED ──step()──▶ STEPPING ──run_until_converged──▶ CONVERGED | EXHAUSTED
//! ```
//!
//! Running out of budget is a normal terminal state, not an error; check
//! [`Simulation::state`] or [`Simulation::converged`] afterwards.

use tracing::{debug, info};

use crate::dynamics::{Confusion, Dynamics, DynamicsKind, UpdateOrder};
use crate::error::{Error, Result};
use crate::game::Game;
use crate::mechanics::seeded;
use crate::simulation::convergence;
use crate::simulation::history::History;
use crate::simulation::metrics::{Metric, MetricKind, MetricSeries, Snapshot};
use crate::strategy::{ReceiverStrategy, SenderStrategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Stepping,
    Converged,
    Exhausted,
}

#[derive(Clone, Debug, Default)]
pub struct SimulationOptions {
    /// Initial strategies; missing ones are drawn at random from `seed`.
    pub sender: Option<SenderStrategy>,
    pub receiver: Option<ReceiverStrategy>,
    pub seed: u64,
    /// Limited-perception operator, applied after every update.
    pub confusion: Option<Confusion>,
    /// Turn order within a step; simultaneous unless asked otherwise.
    pub order: UpdateOrder,
    /// Metric names, resolved through [`MetricKind::from_name`].
    pub metrics: Vec<String>,
}

pub struct Simulation<D: Dynamics = DynamicsKind> {
    game: Game,
    dynamics: D,
    confusion: Option<Confusion>,
    order: UpdateOrder,
    history: History,
    series: Vec<MetricSeries>,
    state: RunState,
}

impl<D: Dynamics> Simulation<D> {
    pub fn new(game: Game, dynamics: D, options: SimulationOptions) -> Result<Self> {
        Self::with_metrics(game, dynamics, options, Vec::new())
    }

    /// Like [`Simulation::new`], registering `custom` metrics after the named ones.
    pub fn with_metrics(
        game: Game,
        dynamics: D,
        options: SimulationOptions,
        custom: Vec<Box<dyn Metric>>,
    ) -> Result<Self> {
        let mut series = Vec::with_capacity(options.metrics.len() + custom.len());
        for name in &options.metrics {
            series.push(MetricSeries::new(Box::new(MetricKind::from_name(name)?)));
        }
        series.extend(custom.into_iter().map(MetricSeries::new));

        let (n, m, a) = (game.states().size(), game.messages().size(), game.actions().size());
        if let Some(c) = &options.confusion {
            if c.size() != n || c.size() != a {
                return Err(Error::argument(format!(
                    "confusion matrix is {0}x{0}, game has {n} states and {a} actions",
                    c.size()
                )));
            }
        }

        let mut rng = seeded(options.seed);
        let sender = match options.sender {
            Some(s) if s.values().shape() == (n, m) => s,
            Some(s) => {
                return Err(Error::argument(format!(
                    "sender strategy is {:?}, expected {n}x{m}",
                    s.values().shape()
                )));
            }
            None => SenderStrategy::create_random(game.states(), game.messages(), &mut rng)?,
        };
        let receiver = match options.receiver {
            Some(r) if r.values().shape() == (m, a) => r,
            Some(r) => {
                return Err(Error::argument(format!(
                    "receiver strategy is {:?}, expected {m}x{a}",
                    r.values().shape()
                )));
            }
            None => ReceiverStrategy::create_random(game.messages(), game.actions(), &mut rng)?,
        };

        let mut sim = Self {
            game,
            dynamics,
            confusion: options.confusion,
            order: options.order,
            history: History::new(sender, receiver),
            series,
            state: RunState::Initialized,
        };
        sim.measure();
        Ok(sim)
    }

    fn measure(&mut self) {
        let snapshot = Snapshot { game: &self.game, history: &self.history };
        for s in self.series.iter_mut() {
            s.record(&snapshot);
        }
    }

    /// Apply the dynamics (and confusion, if any) once and record metrics.
    pub fn step(&mut self) -> Result<()> {
        let (sender, receiver) = self.history.current();
        let (sender, receiver) = match self.order {
            UpdateOrder::Simultaneous => {
                let (mut sender, mut receiver) =
                    self.dynamics.update(sender, receiver, &self.game)?;
                if let Some(c) = &self.confusion {
                    sender = c.apply_sender(&sender)?;
                    receiver = c.apply_receiver(&receiver)?;
                }
                (sender, receiver)
            }
            UpdateOrder::Sequential => {
                self.dynamics
                    .update_sequential(sender, receiver, &self.game, self.confusion.as_ref())?
            }
        };
        self.history.push(sender, receiver);
        self.measure();
        self.state = RunState::Stepping;

        if let Some((ds, dr)) = convergence::deltas(&self.history) {
            debug!(step = self.current_step(), sender_delta = ds, receiver_delta = dr, "stepped");
        }
        Ok(())
    }

    /// Step while `current_step < max_steps` and not converged.
    ///
    /// `max_steps` must convert to a non-negative integer.
    pub fn run_until_converged<S: TryInto<usize>>(&mut self, max_steps: S) -> Result<RunState> {
        let max_steps: usize = max_steps
            .try_into()
            .map_err(|_| Error::argument("max_steps must be a non-negative integer"))?;

        while self.current_step() < max_steps && !self.converged() {
            self.step()?;
        }

        self.state = if self.converged() {
            info!(steps = self.current_step(), dynamics = self.dynamics.name(), "converged");
            RunState::Converged
        } else {
            info!(steps = self.current_step(), max_steps, "step budget exhausted");
            RunState::Exhausted
        };
        Ok(self.state)
    }

    pub fn converged(&self) -> bool {
        convergence::converged(&self.history)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn current_step(&self) -> usize {
        self.history.current_step()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn order(&self) -> UpdateOrder {
        self.order
    }

    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn sender_strategy(&self, step: usize) -> Option<&SenderStrategy> {
        self.history.sender(step)
    }

    pub fn receiver_strategy(&self, step: usize) -> Option<&ReceiverStrategy> {
        self.history.receiver(step)
    }

    pub fn current_sender_strategy(&self) -> &SenderStrategy {
        self.history.current().0
    }

    pub fn current_receiver_strategy(&self) -> &ReceiverStrategy {
        self.history.current().1
    }

    /// Time series of the metric registered under `name`.
    pub fn measurements(&self, name: &str) -> Option<&[f64]> {
        self.series.iter().find(|s| s.name() == name).map(MetricSeries::values)
    }

    pub fn metric_series(&self) -> &[MetricSeries] {
        &self.series
    }
}
