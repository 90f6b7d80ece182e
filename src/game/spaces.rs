//! State, message and action spaces.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Tolerance on Σpriors = 1 for caller-supplied priors.
pub const PRIOR_SUM_EPS: f64 = 1e-6;

/// One element of a finite space.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Label(String),
    Number(f64),
}

impl Element {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Element::Number(x) => Some(*x),
            Element::Label(_) => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Label(s) => f.write_str(s),
            Element::Number(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Label(s.to_string())
    }
}

impl From<f64> for Element {
    fn from(x: f64) -> Self {
        Element::Number(x)
    }
}

/// `priors` is a probability vector over `n` states.
pub fn valid_priors(priors: &[f64], n: usize) -> bool {
    priors.len() == n
        && priors.iter().all(|p| p.is_finite() && *p >= 0.0)
        && (priors.iter().sum::<f64>() - 1.0).abs() <= PRIOR_SUM_EPS
}

/// States with a prior and (optionally) pairwise distances.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    elements: Vec<Element>,
    priors: Vec<f64>,
    distances: Option<DMatrix<f64>>,
}

impl StateSpace {
    pub fn new<E: Into<Element>>(elements: Vec<E>, priors: Vec<f64>) -> Result<Self> {
        let elements: Vec<Element> = elements.into_iter().map(Into::into).collect();
        if elements.is_empty() {
            return Err(Error::argument("state space must not be empty"));
        }
        if !valid_priors(&priors, elements.len()) {
            return Err(Error::argument(format!(
                "priors {priors:?} are not a distribution over {} states",
                elements.len()
            )));
        }
        Ok(Self { elements, priors, distances: None })
    }

    /// Uniform prior over `elements`.
    pub fn uniform<E: Into<Element>>(elements: Vec<E>) -> Result<Self> {
        let n = elements.len().max(1);
        Self::new(elements, vec![1.0 / n as f64; n])
    }

    /// Attach a distance matrix: square, symmetric, non-negative, zero diagonal.
    pub fn with_distances(mut self, distances: DMatrix<f64>) -> Result<Self> {
        let n = self.size();
        if distances.shape() != (n, n) {
            return Err(Error::argument(format!(
                "distance matrix is {:?}, expected {n}x{n}",
                distances.shape()
            )));
        }
        for i in 0..n {
            if distances[(i, i)] != 0.0 {
                return Err(Error::argument(format!("distance d({i},{i}) must be 0")));
            }
            for j in 0..n {
                let d = distances[(i, j)];
                if !d.is_finite() || d < 0.0 || d != distances[(j, i)] {
                    return Err(Error::argument(format!(
                        "distance d({i},{j}) = {d} breaks symmetry or non-negativity"
                    )));
                }
            }
        }
        self.distances = Some(distances);
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    pub fn distances(&self) -> Option<&DMatrix<f64>> {
        self.distances.as_ref()
    }

    /// Element values when every element is numeric.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.elements.iter().map(Element::as_number).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageSpace {
    elements: Vec<Element>,
}

impl MessageSpace {
    pub fn new<E: Into<Element>>(elements: Vec<E>) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::argument("message space must not be empty"));
        }
        Ok(Self { elements: elements.into_iter().map(Into::into).collect() })
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// Receiver actions. In sim-max games this is an owned copy of the states.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSpace(StateSpace);

impl ActionSpace {
    /// Value clone of `states`; later changes to either side never alias.
    pub fn from_states(states: &StateSpace) -> Self {
        Self(states.clone())
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn elements(&self) -> &[Element] {
        self.0.elements()
    }

    pub fn priors(&self) -> &[f64] {
        self.0.priors()
    }

    pub fn distances(&self) -> Option<&DMatrix<f64>> {
        self.0.distances()
    }
}
