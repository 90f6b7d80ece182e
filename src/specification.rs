//! Nested key-value specification records.
//!
//! Game, space and dynamics descriptions arrive as loosely typed trees (TOML
//! tables, JSON objects). `Specification` wraps one node of such a tree and
//! remembers its dotted path, so every failure names the offending key.
//! Unknown keys are ignored; only the factories decide what is required.

use serde_json::Value;

use crate::error::SpecificationError;

#[derive(Clone, Debug, PartialEq)]
pub struct Specification {
    path: String,
    value: Value,
}

impl Specification {
    pub fn from_value(value: Value) -> Self {
        Self { path: String::new(), value }
    }

    /// Node rooted at `path`, so errors read e.g. `game.states.elements`.
    pub fn at(path: impl Into<String>, value: Value) -> Self {
        Self { path: path.into(), value }
    }

    /// Dotted path of this node from the root ("" for the root itself).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Child record, `None` when absent or explicitly null.
    pub fn get(&self, key: &str) -> Option<Specification> {
        match self.value.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(Self { path: self.key_path(key), value: v.clone() }),
        }
    }

    pub fn get_or_fail(&self, key: &str) -> Result<Specification, SpecificationError> {
        self.get(key).ok_or_else(|| SpecificationError::missing(self.key_path(key)))
    }

    /// The `type` discriminator, or `default` when absent.
    pub fn type_or(&self, default: &str) -> Result<String, SpecificationError> {
        match self.get("type") {
            None => Ok(default.to_string()),
            Some(t) => t.as_str().map(str::to_string),
        }
    }

    /// Resolve the `type` discriminator against a closed table of variants.
    pub fn variant<K: Copy>(
        &self,
        default: &str,
        table: &[(&str, K)],
    ) -> Result<K, SpecificationError> {
        let tag = self.type_or(default)?;
        table
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| SpecificationError::invalid(self.key_path("type"), tag))
    }

    pub fn as_str(&self) -> Result<&str, SpecificationError> {
        self.value.as_str().ok_or_else(|| self.invalid())
    }

    pub fn as_usize(&self) -> Result<usize, SpecificationError> {
        self.value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.invalid())
    }

    pub fn as_f64(&self) -> Result<f64, SpecificationError> {
        self.value.as_f64().filter(|x| x.is_finite()).ok_or_else(|| self.invalid())
    }

    pub fn as_f64_list(&self) -> Result<Vec<f64>, SpecificationError> {
        let items = self.value.as_array().ok_or_else(|| self.invalid())?;
        items
            .iter()
            .map(|v| v.as_f64().filter(|x| x.is_finite()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| self.invalid())
    }

    /// Error naming this node and its current value.
    pub fn invalid(&self) -> SpecificationError {
        let shown = match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        SpecificationError::invalid(self.path.clone(), shown)
    }
}

impl From<Value> for Specification {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
