//! Scalar measurements taken once per step.

use crate::dynamics::payoff::expected_utility;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::simulation::convergence;
use crate::simulation::history::History;

/// Read-only view of the simulation at its newest step.
pub struct Snapshot<'a> {
    pub game: &'a Game,
    pub history: &'a History,
}

impl Snapshot<'_> {
    pub fn step(&self) -> usize {
        self.history.current_step()
    }
}

pub trait Metric {
    fn name(&self) -> &str;
    fn calculate(&self, snapshot: &Snapshot<'_>) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    ExpectedUtility,
    NormalizedExpectedUtility,
    StrategyChange,
}

impl MetricKind {
    pub const TABLE: &'static [(&'static str, MetricKind)] = &[
        ("expected utility", MetricKind::ExpectedUtility),
        ("normalized expected utility", MetricKind::NormalizedExpectedUtility),
        ("strategy change", MetricKind::StrategyChange),
    ];

    pub fn from_name(name: &str) -> Result<Self> {
        Self::TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| Error::UnsupportedMetric(name.to_string()))
    }
}

impl Metric for MetricKind {
    fn name(&self) -> &str {
        Self::TABLE
            .iter()
            .find(|(_, kind)| kind == self)
            .map_or("unknown", |(n, _)| *n)
    }

    fn calculate(&self, snapshot: &Snapshot<'_>) -> f64 {
        let (sender, receiver) = snapshot.history.current();
        match self {
            MetricKind::ExpectedUtility => expected_utility(sender, receiver, snapshot.game),
            MetricKind::NormalizedExpectedUtility => {
                let total = snapshot.game.utility().sum();
                let eu = expected_utility(sender, receiver, snapshot.game);
                if total != 0.0 { eu / total } else { 0.0 }
            }
            MetricKind::StrategyChange => {
                convergence::deltas(snapshot.history).map_or(0.0, |(ds, dr)| ds + dr)
            }
        }
    }
}

/// One registered metric and its values, aligned by step index.
pub struct MetricSeries {
    metric: Box<dyn Metric>,
    values: Vec<f64>,
}

impl MetricSeries {
    pub fn new(metric: Box<dyn Metric>) -> Self {
        Self { metric, values: Vec::new() }
    }

    pub fn name(&self) -> &str {
        self.metric.name()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn record(&mut self, snapshot: &Snapshot<'_>) {
        self.values.push(self.metric.calculate(snapshot));
    }
}
