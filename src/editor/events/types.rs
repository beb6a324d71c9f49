//! # Event Types
//!
//! Value types shared by the live model, the event bus and the views.
//! Payloads of model events are built from these types, so every subscriber
//! sees the same shapes the store holds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a variable within one model.
///
/// Auto-allocated ids are non-negative integers rendered as strings, but imported
/// models may carry arbitrary ids, so the id is kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(String);

impl VariableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariableId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VariableId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<usize> for VariableId {
    fn from(id: usize) -> Self {
        Self(id.to_string())
    }
}

/// Position of a variable on the editor canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parse the `"x,y"` layout string used in model metadata.
    ///
    /// Anything other than exactly two finite numbers yields `None`.
    pub fn parse_layout(text: &str) -> Option<Self> {
        let mut parts = text.split(',');
        let (x, y) = match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => return None,
        };
        let x: f64 = x.trim().parse().ok()?;
        let y: f64 = y.trim().parse().ok()?;
        if x.is_finite() && y.is_finite() {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Render the position in the `"x,y"` metadata layout format
    pub fn to_layout(&self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

/// A named node of the regulatory graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub position: Option<Position>,
}

/// Sign of a regulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Monotonicity {
    Activation,
    Inhibition,
    #[default]
    Unknown,
}

impl Monotonicity {
    /// Next value in the editor's toggle cycle: unknown, activation, inhibition.
    pub fn cycle(self) -> Self {
        match self {
            Monotonicity::Unknown => Monotonicity::Activation,
            Monotonicity::Activation => Monotonicity::Inhibition,
            Monotonicity::Inhibition => Monotonicity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Monotonicity::Activation => "activation",
            Monotonicity::Inhibition => "inhibition",
            Monotonicity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Monotonicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a regulation: the ordered `(source, target)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegulationId {
    pub source: VariableId,
    pub target: VariableId,
}

impl RegulationId {
    pub fn new(source: impl Into<VariableId>, target: impl Into<VariableId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A directed, signed edge between two variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    pub source: VariableId,
    pub target: VariableId,
    pub is_observable: bool,
    pub monotonicity: Monotonicity,
}

impl Regulation {
    pub fn id(&self) -> RegulationId {
        RegulationId {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}

/// Ephemeral set of selected graph elements, never persisted in the model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub variables: Vec<VariableId>,
    pub regulations: Vec<RegulationId>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.regulations.is_empty()
    }
}
