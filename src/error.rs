//! Error types for game construction, stepping and export.

use thiserror::Error;

/// A game or dynamics specification could not be turned into typed objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecificationError {
    /// A required key is absent.
    #[error("missing key `{key}`")]
    MissingKey { key: String },

    /// A key is present but its value is unknown or malformed.
    #[error("invalid value `{value}` for key `{key}`")]
    InvalidValue { key: String, value: String },
}

impl SpecificationError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self::InvalidValue { key: key.into(), value: value.to_string() }
    }
}

/// Errors surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown variant discriminator or missing/malformed specification key.
    #[error("invalid specification: {0}")]
    InvalidSpecification(#[from] SpecificationError),

    /// Wrong type or range for a parameter (step budget, strategy shape, ...).
    #[error("invalid argument: {0}")]
    Argument(String),

    /// A strategy row summed to zero during normalization.
    #[error("degenerate strategy: row {row} sums to zero")]
    DegenerateStrategy { row: usize },

    /// A metric name with no known implementation.
    #[error("unsupported metric: {0}")]
    UnsupportedMetric(String),

    /// Malformed delimited strategy table.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Run configuration could not be decoded.
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
