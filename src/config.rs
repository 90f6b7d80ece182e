//! Run configuration loaded from TOML.
//!
//! ```toml
//! [game]
//! type = "sim-max"
//! states = { elements = { type = "numeric range", size = 10 }, metric = { type = "euclidean" } }
//! messages = { elements = { size = 3 } }
//!
//! [dynamics]
//! type = "replicator"
//!
//! [perception]
//! limited = true
//! acuity = 0.5
//!
//! [simulation]
//! max_steps = 500
//! seed = 7
//! order = "sequential"
//! metrics = ["expected utility"]
//! ```
//!
//! Runs loaded from a config take turns (`order = "sequential"`) unless told
//! otherwise; [`SimulationOptions`] built by hand default to simultaneous.

use std::fs;
use std::path::Path;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dynamics::{Confusion, DynamicsKind, UpdateOrder};
use crate::error::{Error, Result, SpecificationError};
use crate::game::{Game, create_game};
use crate::mechanics::{create_identity, create_nosofsky};
use crate::simulation::SimulationOptions;
use crate::specification::Specification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub game: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub dynamics: Value,
    #[serde(default)]
    pub perception: PerceptionConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerceptionConfig {
    #[serde(default)]
    pub limited: bool,
    #[serde(default = "PerceptionConfig::default_acuity")]
    pub acuity: f64,
}

impl PerceptionConfig {
    fn default_acuity() -> f64 {
        1.0
    }
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self { limited: false, acuity: Self::default_acuity() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Signed so that a negative budget reaches the driver and is rejected there.
    #[serde(default = "SimulationConfig::default_max_steps")]
    pub max_steps: i64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "SimulationConfig::default_order")]
    pub order: UpdateOrder,
    #[serde(default)]
    pub metrics: Vec<String>,
}

impl SimulationConfig {
    fn default_max_steps() -> i64 {
        100
    }

    fn default_order() -> UpdateOrder {
        UpdateOrder::Sequential
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::default_max_steps(),
            seed: 0,
            order: Self::default_order(),
            metrics: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn game_spec(&self) -> Result<Specification> {
        Self::section("game", &self.game)
    }

    pub fn dynamics_spec(&self) -> Result<Specification> {
        Self::section("dynamics", &self.dynamics)
    }

    fn section(key: &str, value: &Value) -> Result<Specification> {
        if value.is_null() {
            return Err(SpecificationError::missing(key).into());
        }
        Ok(Specification::at(key, value.clone()))
    }

    pub fn build_game(&self) -> Result<Game> {
        create_game(&self.game_spec()?)
    }

    pub fn build_dynamics(&self) -> Result<DynamicsKind> {
        DynamicsKind::from_spec(&self.dynamics_spec()?)
    }

    /// Confusion operator when `perception.limited` is set.
    pub fn build_confusion(&self, game: &Game) -> Result<Option<Confusion>> {
        if !self.perception.limited {
            return Ok(None);
        }
        Confusion::from_acuity(game.states(), self.perception.acuity).map(Some)
    }

    pub fn simulation_options(&self, game: &Game) -> Result<SimulationOptions> {
        Ok(SimulationOptions {
            sender: None,
            receiver: None,
            seed: self.simulation.seed,
            confusion: self.build_confusion(game)?,
            order: self.simulation.order,
            metrics: self.simulation.metrics.clone(),
        })
    }

    /// Similarity the vagueness verdict is judged against.
    ///
    /// Built from the state metric and `perception.acuity` whether or not
    /// perception is limited; identity when states carry no metric.
    pub fn analysis_similarity(&self, game: &Game) -> Result<DMatrix<f64>> {
        let acuity = self.perception.acuity;
        if !(acuity.is_finite() && acuity > 0.0) {
            return Err(Error::argument(format!("acuity must be positive, got {acuity}")));
        }
        Ok(match game.states().distances() {
            Some(d) => create_nosofsky(d, 1.0 / acuity),
            None => create_identity(game.states().size()),
        })
    }
}
