//! Model snapshots
//!
//! The format-neutral shape exchanged with model readers and writers. Layout
//! travels in `metadata["position"]`, a map from variable *name* to an `"x,y"`
//! string.

use super::live_model::LiveModel;
use crate::editor::events::{Monotonicity, Position, VariableId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key holding variable positions
pub const POSITION_KEY: &str = "position";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableEntry {
    pub id: VariableId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulationEntry {
    pub source: VariableId,
    pub target: VariableId,
    pub is_observable: bool,
    /// `None` (serialized as `null`) means the sign is unknown
    #[serde(default)]
    pub monotonicity: Option<Monotonicity>,
}

/// A parsed or exported model, independent of the live store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub variables: Vec<VariableEntry>,
    pub regulations: Vec<RegulationEntry>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ModelSnapshot {
    /// Capture the current state of a live model
    pub fn from_model(model: &LiveModel) -> Self {
        let mut snapshot = Self {
            variables: model
                .variables()
                .map(|variable| VariableEntry {
                    id: variable.id.clone(),
                    name: variable.name.clone(),
                })
                .collect(),
            regulations: model
                .regulations()
                .map(|regulation| RegulationEntry {
                    source: regulation.source.clone(),
                    target: regulation.target.clone(),
                    is_observable: regulation.is_observable,
                    monotonicity: match regulation.monotonicity {
                        Monotonicity::Unknown => None,
                        known => Some(known),
                    },
                })
                .collect(),
            metadata: Map::new(),
        };
        for variable in model.variables() {
            if let Some(position) = variable.position {
                snapshot.set_position(&variable.name, position);
            }
        }
        snapshot
    }

    /// Raw layout string stored for a variable name
    pub fn layout_of(&self, name: &str) -> Option<&str> {
        self.metadata
            .get(POSITION_KEY)
            .and_then(|positions| positions.get(name))
            .and_then(Value::as_str)
    }

    /// Parsed position of a variable name; malformed layout reads as `None`
    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.layout_of(name).and_then(Position::parse_layout)
    }

    pub fn set_position(&mut self, name: &str, position: Position) {
        let positions = self
            .metadata
            .entry(POSITION_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !positions.is_object() {
            *positions = Value::Object(Map::new());
        }
        if let Value::Object(positions) = positions {
            positions.insert(name.to_string(), Value::String(position.to_layout()));
        }
    }

    /// Name of the variable with the given id
    pub fn name_of(&self, id: &VariableId) -> Option<&str> {
        self.variables
            .iter()
            .find(|variable| variable.id == *id)
            .map(|variable| variable.name.as_str())
    }
}
