//! Live model for the editor
//!
//! The live model is the single source of truth about the variables and
//! regulations of the network currently being edited. Every mutation goes
//! through it, and every mutation is announced on the event bus only after the
//! model invariants hold again:
//!
//! - every regulation references two live variables,
//! - at most one regulation exists per ordered `(source, target)` pair,
//! - deleting a variable first deletes (and announces) all of its regulations.

use crate::editor::events::{
    Channel, EventBus, ListenerHandle, ModelEvent, Monotonicity, Position, Regulation,
    RegulationId, Selection, SimpleEventBus, Variable, VariableId,
};
use super::snapshot::ModelSnapshot;
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

/// Recoverable errors reported by live model operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(
        "regulation {} -> {} references unknown variable '{missing}'",
        .regulation.source,
        .regulation.target
    )]
    UnknownEndpoint {
        regulation: RegulationId,
        missing: VariableId,
    },

    #[error("variable '{0}' does not exist")]
    UnknownVariable(VariableId),
}

/// Arguments of `ensure_variable`; omitted fields are allocated or left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableUpdate {
    pub id: Option<VariableId>,
    pub name: Option<String>,
    pub position: Option<Position>,
}

impl VariableUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<VariableId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Arguments of `ensure_regulation`
///
/// When updating an existing regulation, an omitted `is_observable` keeps the
/// stored value while an omitted `monotonicity` resets it to `Unknown`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegulationUpdate {
    pub source: VariableId,
    pub target: VariableId,
    pub is_observable: Option<bool>,
    pub monotonicity: Option<Monotonicity>,
}

impl RegulationUpdate {
    pub fn new(source: impl Into<VariableId>, target: impl Into<VariableId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            is_observable: None,
            monotonicity: None,
        }
    }

    pub fn observable(mut self, is_observable: bool) -> Self {
        self.is_observable = Some(is_observable);
        self
    }

    pub fn monotonicity(mut self, monotonicity: Monotonicity) -> Self {
        self.monotonicity = Some(monotonicity);
        self
    }

    /// Update that rewrites every field of an existing regulation
    pub fn from_regulation(regulation: &Regulation) -> Self {
        Self {
            source: regulation.source.clone(),
            target: regulation.target.clone(),
            is_observable: Some(regulation.is_observable),
            monotonicity: Some(regulation.monotonicity),
        }
    }
}

/// The authoritative store of variables and regulations
pub struct LiveModel {
    /// Variables in insertion order, keyed by id
    variables: IndexMap<VariableId, Variable>,
    /// Regulations keyed by source, then target; every live variable has an entry
    regulations: IndexMap<VariableId, IndexMap<VariableId, Regulation>>,
    events: Arc<dyn EventBus>,
}

impl LiveModel {
    /// Create an empty model publishing on the given bus
    pub fn new(events: Arc<dyn EventBus>) -> Self {
        Self {
            variables: IndexMap::new(),
            regulations: IndexMap::new(),
            events,
        }
    }

    /// The bus this model publishes on
    pub fn events(&self) -> Arc<dyn EventBus> {
        Arc::clone(&self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn regulation_count(&self) -> usize {
        self.regulations.values().map(IndexMap::len).sum()
    }

    pub fn variable(&self, id: &VariableId) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn regulation(&self, source: &VariableId, target: &VariableId) -> Option<&Regulation> {
        self.regulations.get(source).and_then(|targets| targets.get(target))
    }

    /// Variables in insertion order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Regulations ordered by source, then by target insertion
    pub fn regulations(&self) -> impl Iterator<Item = &Regulation> {
        self.regulations.values().flat_map(IndexMap::values)
    }

    /// Regulations whose target is the given variable
    pub fn regulations_of(&self, target: &VariableId) -> Vec<&Regulation> {
        self.regulations
            .values()
            .filter_map(|targets| targets.get(target))
            .collect()
    }

    /// Id of the first variable (in insertion order) with the given name
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variables
            .values()
            .find(|variable| variable.name == name)
            .map(|variable| variable.id.clone())
    }

    /// Format-neutral copy of the current model, layout included
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot::from_model(self)
    }

    /// Update the variable if it exists, otherwise create it.
    ///
    /// New variables without an id receive the lowest unused non-negative
    /// integer id; without a name they are called `v_<id>`.
    pub fn ensure_variable(&mut self, update: VariableUpdate) -> VariableId {
        let existing = match &update.id {
            Some(id) => self.variables.get_mut(id),
            None => None,
        };
        if let Some(variable) = existing {
            if let Some(name) = update.name {
                variable.name = name;
            }
            if let Some(position) = update.position {
                variable.position = Some(position);
            }
            let variable = variable.clone();
            let id = variable.id.clone();
            tracing::debug!("Updated variable {} ({})", id, variable.name);
            self.events.emit(ModelEvent::Variable(variable));
            return id;
        }

        let id = update.id.unwrap_or_else(|| self.next_free_id());
        let name = update.name.unwrap_or_else(|| format!("v_{id}"));
        let variable = Variable {
            id: id.clone(),
            name,
            position: update.position,
        };

        self.regulations.entry(id.clone()).or_default();
        self.variables.insert(id.clone(), variable.clone());
        tracing::debug!("Created variable {} ({})", id, variable.name);
        self.events.emit(ModelEvent::Variable(variable));
        id
    }

    /// Remove a variable together with all regulations it takes part in.
    ///
    /// Every `RegulationDeleted` event is delivered before the
    /// `VariableDeleted` event. Unknown ids are ignored.
    pub fn delete_variable(&mut self, id: &VariableId) {
        if !self.variables.contains_key(id) {
            return;
        }

        let mut dependent: Vec<RegulationId> = self
            .regulations
            .get(id)
            .map(|targets| {
                targets
                    .keys()
                    .map(|target| RegulationId::new(id.clone(), target.clone()))
                    .collect()
            })
            .unwrap_or_default();
        dependent.extend(
            self.regulations
                .iter()
                .filter(|(source, targets)| *source != id && targets.contains_key(id))
                .map(|(source, _)| RegulationId::new(source.clone(), id.clone())),
        );

        for regulation in &dependent {
            self.delete_regulation(&regulation.source, &regulation.target);
        }

        self.variables.shift_remove(id);
        self.regulations.shift_remove(id);
        tracing::debug!(
            "Deleted variable {} after {} regulation(s)",
            id,
            dependent.len()
        );
        self.prune_selection();
        self.events
            .emit(ModelEvent::VariableDeleted { id: id.clone() });
    }

    /// Update the regulation if it exists, otherwise create it.
    ///
    /// Both endpoints must be live variables; otherwise the model is left
    /// untouched and `ModelError::UnknownEndpoint` is returned.
    pub fn ensure_regulation(&mut self, update: RegulationUpdate) -> Result<(), ModelError> {
        for endpoint in [&update.source, &update.target] {
            if !self.variables.contains_key(endpoint) {
                return Err(ModelError::UnknownEndpoint {
                    regulation: RegulationId::new(update.source.clone(), update.target.clone()),
                    missing: endpoint.clone(),
                });
            }
        }

        let targets = self.regulations.entry(update.source.clone()).or_default();
        let regulation = match targets.get_mut(&update.target) {
            Some(existing) => {
                if let Some(is_observable) = update.is_observable {
                    existing.is_observable = is_observable;
                }
                // Omitted monotonicity resets to unknown, unlike observability.
                existing.monotonicity = update.monotonicity.unwrap_or_default();
                existing.clone()
            }
            None => {
                let regulation = Regulation {
                    source: update.source.clone(),
                    target: update.target.clone(),
                    is_observable: update.is_observable.unwrap_or(false),
                    monotonicity: update.monotonicity.unwrap_or_default(),
                };
                targets.insert(update.target.clone(), regulation.clone());
                regulation
            }
        };

        tracing::debug!(
            "Ensured regulation {} -> {} ({}, observable: {})",
            regulation.source,
            regulation.target,
            regulation.monotonicity,
            regulation.is_observable
        );
        self.events.emit(ModelEvent::Regulation(regulation));
        Ok(())
    }

    /// Remove a regulation; unknown pairs are ignored
    pub fn delete_regulation(&mut self, source: &VariableId, target: &VariableId) {
        let removed = self
            .regulations
            .get_mut(source)
            .and_then(|targets| targets.shift_remove(target));
        if removed.is_some() {
            tracing::debug!("Deleted regulation {} -> {}", source, target);
            self.prune_selection();
            self.events.emit(ModelEvent::RegulationDeleted {
                id: RegulationId::new(source.clone(), target.clone()),
            });
        }
    }

    /// Delete every variable, and with them every regulation
    pub fn clear(&mut self) {
        let ids: Vec<VariableId> = self.variables.keys().cloned().collect();
        for id in &ids {
            self.delete_variable(id);
        }
        tracing::debug!("Cleared {} variable(s)", ids.len());
    }

    /// Announce hover state of a variable; ignored for unknown ids
    pub fn hover_variable(&self, id: &VariableId, hover: bool) {
        if self.variables.contains_key(id) {
            self.events.emit(ModelEvent::VariableHovered {
                id: id.clone(),
                hover,
            });
        }
    }

    /// Announce hover state of a regulation; ignored for unknown pairs
    pub fn hover_regulation(&self, source: &VariableId, target: &VariableId, hover: bool) {
        if self.regulation(source, target).is_some() {
            self.events.emit(ModelEvent::RegulationHovered {
                id: RegulationId::new(source.clone(), target.clone()),
                hover,
            });
        }
    }

    /// Announce a new selection, restricted to elements that still exist.
    ///
    /// The selection is saved on the bus so that commands acting on "the
    /// selected elements" can read it back later.
    pub fn selection(&self, variables: Vec<VariableId>, regulations: Vec<RegulationId>) {
        let selection = self.retain_existing(Selection {
            variables,
            regulations,
        });
        self.events
            .emit_and_save(ModelEvent::SelectionChanged(selection));
    }

    /// The last announced selection, without elements deleted since then
    pub fn current_selection(&self) -> Selection {
        match self.events.saved(Channel::Selection) {
            Some(ModelEvent::SelectionChanged(selection)) => self.retain_existing(selection),
            _ => Selection::default(),
        }
    }

    /// Drop deleted elements from the saved selection, so that an id reused
    /// by a later insert is never considered selected.
    fn prune_selection(&self) {
        let saved = match self.events.saved(Channel::Selection) {
            Some(ModelEvent::SelectionChanged(selection)) => selection,
            _ => return,
        };
        let pruned = self.retain_existing(saved.clone());
        if pruned == saved {
            return;
        }
        if pruned.is_empty() {
            self.events.clear_saved(Channel::Selection);
        } else {
            self.events.save(ModelEvent::SelectionChanged(pruned));
        }
    }

    fn retain_existing(&self, mut selection: Selection) -> Selection {
        selection
            .variables
            .retain(|id| self.variables.contains_key(id));
        selection
            .regulations
            .retain(|id| self.regulation(&id.source, &id.target).is_some());
        selection
    }

    fn next_free_id(&self) -> VariableId {
        (0usize..)
            .map(VariableId::from)
            .find(|id| !self.variables.contains_key(id))
            .unwrap_or_else(|| VariableId::from(self.variables.len()))
    }

    pub fn on_variable(
        &self,
        listener: impl Fn(&Variable) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::Variable,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::Variable(variable) = event {
                    listener(variable);
                }
            }),
        )
    }

    pub fn on_delete_variable(
        &self,
        listener: impl Fn(&VariableId) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::VariableDelete,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::VariableDeleted { id } = event {
                    listener(id);
                }
            }),
        )
    }

    pub fn on_regulation(
        &self,
        listener: impl Fn(&Regulation) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::Regulation,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::Regulation(regulation) = event {
                    listener(regulation);
                }
            }),
        )
    }

    pub fn on_delete_regulation(
        &self,
        listener: impl Fn(&RegulationId) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::RegulationDelete,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::RegulationDeleted { id } = event {
                    listener(id);
                }
            }),
        )
    }

    pub fn on_variable_hover(
        &self,
        listener: impl Fn(&VariableId, bool) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::VariableHover,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::VariableHovered { id, hover } = event {
                    listener(id, *hover);
                }
            }),
        )
    }

    pub fn on_regulation_hover(
        &self,
        listener: impl Fn(&RegulationId, bool) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::RegulationHover,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::RegulationHovered { id, hover } = event {
                    listener(id, *hover);
                }
            }),
        )
    }

    pub fn on_selection(
        &self,
        listener: impl Fn(&Selection) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.add_listener(
            Channel::Selection,
            Arc::new(move |event: &ModelEvent| {
                if let ModelEvent::SelectionChanged(selection) = event {
                    listener(selection);
                }
            }),
        )
    }
}

impl Default for LiveModel {
    fn default() -> Self {
        Self::new(Arc::new(SimpleEventBus::new()))
    }
}

impl std::fmt::Debug for LiveModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveModel")
            .field("variables", &self.variables)
            .field("regulations", &self.regulations)
            .finish_non_exhaustive()
    }
}
