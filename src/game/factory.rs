//! Construction of games and spaces from `Specification` records.
//!
//! Every `type` discriminator resolves through a closed table; anything not
//! listed is rejected with [`SpecificationError::InvalidValue`] naming the
//! key and the value.

use nalgebra::DMatrix;
use tracing::warn;

use crate::error::{Result, SpecificationError};
use crate::game::spaces::{Element, MessageSpace, StateSpace, valid_priors};
use crate::game::Game;
use crate::mechanics::{create_identity, create_nosofsky, euclidean};
use crate::specification::Specification;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind {
    SimMax,
}

impl GameKind {
    pub const TABLE: &'static [(&'static str, GameKind)] = &[("sim-max", GameKind::SimMax)];

    pub fn tag(self) -> &'static str {
        match self {
            GameKind::SimMax => "sim-max",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatesKind {
    MetricSpace,
    NumberedLabels,
}

const STATES_TABLE: &[(&str, StatesKind)] = &[
    ("metric space", StatesKind::MetricSpace),
    ("numbered labels", StatesKind::NumberedLabels),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElementsKind {
    NumberedLabels,
    NumericRange,
}

const ELEMENTS_TABLE: &[(&str, ElementsKind)] = &[
    ("numbered labels", ElementsKind::NumberedLabels),
    ("numeric range", ElementsKind::NumericRange),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MetricKind {
    Euclidean,
}

const METRIC_TABLE: &[(&str, MetricKind)] = &[("euclidean", MetricKind::Euclidean)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SimilarityKind {
    Identity,
    Nosofsky,
}

const SIMILARITY_TABLE: &[(&str, SimilarityKind)] = &[
    ("identity", SimilarityKind::Identity),
    ("nosofsky", SimilarityKind::Nosofsky),
];

/// Build a game; `type` defaults to "sim-max".
pub fn create_game(spec: &Specification) -> Result<Game> {
    match spec.variant("sim-max", GameKind::TABLE)? {
        GameKind::SimMax => {
            let states = create_states(&spec.get_or_fail("states")?)?;
            let messages = create_messages(&spec.get_or_fail("messages")?)?;
            let similarity = create_similarity(spec.get("similarity"), &states)?;
            Game::sim_max(states, messages, similarity)
        }
    }
}

/// Build a state space; `type` defaults to "metric space".
pub fn create_states(spec: &Specification) -> Result<StateSpace> {
    let kind = spec.variant("metric space", STATES_TABLE)?;
    let elements = create_elements(&spec.get_or_fail("elements")?, "t")?;
    let n = elements.len();

    let priors = match spec.get("priors") {
        None => vec![1.0 / n as f64; n],
        Some(p) => {
            let values = p.as_f64_list()?;
            if !valid_priors(&values, n) {
                return Err(p.invalid().into());
            }
            let total: f64 = values.iter().sum();
            if total != 1.0 {
                warn!(key = p.path(), total, "priors re-normalized to sum to one");
                values.into_iter().map(|x| x / total).collect()
            } else {
                values
            }
        }
    };

    let states = StateSpace::new(elements, priors)?;
    match (kind, spec.get("metric")) {
        (StatesKind::MetricSpace, Some(metric)) => {
            match metric.variant("euclidean", METRIC_TABLE)? {
                MetricKind::Euclidean => {
                    let points = states.numeric_values().ok_or_else(|| {
                        SpecificationError::invalid(
                            metric.path(),
                            "euclidean metric over non-numeric elements",
                        )
                    })?;
                    states.with_distances(euclidean(&points))
                }
            }
        }
        _ => Ok(states),
    }
}

pub fn create_messages(spec: &Specification) -> Result<MessageSpace> {
    MessageSpace::new(create_elements(&spec.get_or_fail("elements")?, "m")?)
}

fn create_elements(spec: &Specification, prefix: &str) -> Result<Vec<Element>> {
    let kind = spec.variant("numbered labels", ELEMENTS_TABLE)?;
    let size_spec = spec.get_or_fail("size")?;
    let size = size_spec.as_usize()?;
    if size == 0 {
        return Err(size_spec.invalid().into());
    }
    Ok(match kind {
        ElementsKind::NumberedLabels => {
            (1..=size).map(|i| Element::Label(format!("{prefix}{i}"))).collect()
        }
        ElementsKind::NumericRange => (0..size).map(|i| Element::Number(i as f64)).collect(),
    })
}

fn create_similarity(spec: Option<Specification>, states: &StateSpace) -> Result<DMatrix<f64>> {
    let Some(spec) = spec else {
        return Ok(create_identity(states.size()));
    };
    match spec.variant("identity", SIMILARITY_TABLE)? {
        SimilarityKind::Identity => Ok(create_identity(states.size())),
        SimilarityKind::Nosofsky => {
            let decay_spec = spec.get_or_fail("decay")?;
            let decay = decay_spec.as_f64()?;
            if decay <= 0.0 {
                return Err(decay_spec.invalid().into());
            }
            let distances = states.distances().ok_or_else(|| {
                SpecificationError::invalid(
                    spec.path(),
                    "nosofsky similarity needs a metric on states",
                )
            })?;
            Ok(create_nosofsky(distances, decay))
        }
    }
}
