//! # Variables Panel
//!
//! Side panel listing every variable with the regulations that target it,
//! sorted by variable name.

use crate::editor::events::{
    EventBus, EventBusError, ListenerHandle, Monotonicity, Regulation, RegulationId, VariableId,
};
use crate::editor::models::LiveModel;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One row of the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub id: VariableId,
    pub name: String,
    /// Incoming regulations, e.g. `A -> B` or `A -|? B`
    pub regulations: Vec<String>,
}

#[derive(Debug, Default)]
struct PanelState {
    names: IndexMap<VariableId, String>,
    regulations: IndexMap<RegulationId, Regulation>,
}

impl PanelState {
    fn describe(&self, regulation: &Regulation) -> String {
        let name = |id: &VariableId| {
            self.names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string())
        };
        let arrow = match regulation.monotonicity {
            Monotonicity::Activation => ">",
            Monotonicity::Inhibition => "|",
            Monotonicity::Unknown => "?",
        };
        let observability = if regulation.is_observable { "" } else { "?" };
        format!(
            "{} -{}{} {}",
            name(&regulation.source),
            arrow,
            observability,
            name(&regulation.target)
        )
    }

    fn rows(&self) -> Vec<PanelRow> {
        let mut rows: Vec<PanelRow> = self
            .names
            .iter()
            .map(|(id, name)| PanelRow {
                id: id.clone(),
                name: name.clone(),
                regulations: self
                    .regulations
                    .values()
                    .filter(|regulation| regulation.target == *id)
                    .map(|regulation| self.describe(regulation))
                    .collect(),
            })
            .collect();
        rows.sort_by(|left, right| left.name.cmp(&right.name));
        rows
    }
}

/// Variables panel kept in sync with a live model
pub struct VariablesPanel {
    state: Arc<Mutex<PanelState>>,
    events: Arc<dyn EventBus>,
    handles: Vec<ListenerHandle>,
}

impl VariablesPanel {
    pub fn attach(model: &LiveModel) -> Self {
        let mut initial = PanelState::default();
        for variable in model.variables() {
            initial
                .names
                .insert(variable.id.clone(), variable.name.clone());
        }
        for regulation in model.regulations() {
            initial
                .regulations
                .insert(regulation.id(), regulation.clone());
        }
        let state = Arc::new(Mutex::new(initial));

        let variables = state.clone();
        let deleted_variables = state.clone();
        let regulations = state.clone();
        let deleted_regulations = state.clone();
        let handles = vec![
            model.on_variable(move |variable| {
                lock(&variables)
                    .names
                    .insert(variable.id.clone(), variable.name.clone());
            }),
            model.on_delete_variable(move |id| {
                lock(&deleted_variables).names.shift_remove(id);
            }),
            model.on_regulation(move |regulation| {
                lock(&regulations)
                    .regulations
                    .insert(regulation.id(), regulation.clone());
            }),
            model.on_delete_regulation(move |id| {
                lock(&deleted_regulations).regulations.shift_remove(id);
            }),
        ];

        Self {
            state,
            events: model.events(),
            handles,
        }
    }

    pub fn detach(&mut self) -> Result<(), EventBusError> {
        for handle in self.handles.drain(..) {
            self.events.remove_listener(handle.channel(), handle)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> Vec<PanelRow> {
        lock(&self.state).rows()
    }

    /// Render the panel as plain text, one variable per line
    pub fn render(&self) -> String {
        self.rows()
            .iter()
            .map(|row| {
                if row.regulations.is_empty() {
                    row.name.clone()
                } else {
                    format!("{}: {}", row.name, row.regulations.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Debug for VariablesPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariablesPanel")
            .field("state", &self.state)
            .field("handles", &self.handles)
            .finish()
    }
}

fn lock(state: &Mutex<PanelState>) -> MutexGuard<'_, PanelState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
