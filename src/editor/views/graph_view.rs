//! # Graph View
//!
//! Derived cache of what the graph surface displays. The view never mutates
//! the live model; it only follows the model events and keeps its own nodes
//! and edges in sync, including the purely visual hover and selection flags.

use crate::editor::events::{
    EventBus, EventBusError, ListenerHandle, Position, Regulation, RegulationId, Selection,
    VariableId,
};
use crate::editor::models::LiveModel;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub name: String,
    pub position: Option<Position>,
    pub hovered: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub regulation: Regulation,
    pub hovered: bool,
    pub selected: bool,
}

#[derive(Debug, Default)]
struct GraphState {
    nodes: IndexMap<VariableId, GraphNode>,
    edges: IndexMap<RegulationId, GraphEdge>,
    /// Variable deletions observed while the node still had cached edges
    violations: Vec<VariableId>,
}

impl GraphState {
    fn upsert_node(&mut self, id: &VariableId, name: &str, position: Option<Position>) {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.name = name.to_string();
                node.position = position;
            }
            None => {
                self.nodes.insert(
                    id.clone(),
                    GraphNode {
                        name: name.to_string(),
                        position,
                        hovered: false,
                        selected: false,
                    },
                );
            }
        }
    }

    fn remove_node(&mut self, id: &VariableId) {
        let dangling = self
            .edges
            .keys()
            .filter(|edge| edge.source == *id || edge.target == *id)
            .count();
        if dangling > 0 {
            tracing::warn!(
                "Variable {} deleted while {} of its edges are still displayed",
                id,
                dangling
            );
            self.violations.push(id.clone());
        }
        self.nodes.shift_remove(id);
    }

    fn select(&mut self, selection: &Selection) {
        for (id, node) in self.nodes.iter_mut() {
            node.selected = selection.variables.contains(id);
        }
        for (id, edge) in self.edges.iter_mut() {
            edge.selected = selection.regulations.contains(id);
        }
    }
}

/// Graph surface cache kept in sync with a live model
pub struct GraphView {
    state: Arc<Mutex<GraphState>>,
    events: Arc<dyn EventBus>,
    handles: Vec<ListenerHandle>,
}

impl GraphView {
    /// Subscribe to every model channel and mirror the model's current contents
    pub fn attach(model: &LiveModel) -> Self {
        let state = Arc::new(Mutex::new(GraphState::default()));
        {
            let mut initial = lock(&state);
            for variable in model.variables() {
                initial.upsert_node(&variable.id, &variable.name, variable.position);
            }
            for regulation in model.regulations() {
                initial.edges.insert(
                    regulation.id(),
                    GraphEdge {
                        regulation: regulation.clone(),
                        hovered: false,
                        selected: false,
                    },
                );
            }
        }

        let mut handles = Vec::new();

        let nodes = state.clone();
        handles.push(model.on_variable(move |variable| {
            lock(&nodes).upsert_node(&variable.id, &variable.name, variable.position);
        }));

        let deleted_nodes = state.clone();
        handles.push(model.on_delete_variable(move |id| {
            lock(&deleted_nodes).remove_node(id);
        }));

        let edges = state.clone();
        handles.push(model.on_regulation(move |regulation| {
            let mut state = lock(&edges);
            match state.edges.get_mut(&regulation.id()) {
                Some(edge) => edge.regulation = regulation.clone(),
                None => {
                    state.edges.insert(
                        regulation.id(),
                        GraphEdge {
                            regulation: regulation.clone(),
                            hovered: false,
                            selected: false,
                        },
                    );
                }
            }
        }));

        let deleted_edges = state.clone();
        handles.push(model.on_delete_regulation(move |id| {
            lock(&deleted_edges).edges.shift_remove(id);
        }));

        let hovered_nodes = state.clone();
        handles.push(model.on_variable_hover(move |id, hover| {
            if let Some(node) = lock(&hovered_nodes).nodes.get_mut(id) {
                node.hovered = hover;
            }
        }));

        let hovered_edges = state.clone();
        handles.push(model.on_regulation_hover(move |id, hover| {
            if let Some(edge) = lock(&hovered_edges).edges.get_mut(id) {
                edge.hovered = hover;
            }
        }));

        let selected = state.clone();
        handles.push(model.on_selection(move |selection| {
            lock(&selected).select(selection);
        }));

        Self {
            state,
            events: model.events(),
            handles,
        }
    }

    /// Stop following the model; the cache keeps its last contents
    pub fn detach(&mut self) -> Result<(), EventBusError> {
        for handle in self.handles.drain(..) {
            self.events.remove_listener(handle.channel(), handle)?;
        }
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        !self.handles.is_empty()
    }

    pub fn node(&self, id: &VariableId) -> Option<GraphNode> {
        lock(&self.state).nodes.get(id).cloned()
    }

    pub fn edge(&self, source: &VariableId, target: &VariableId) -> Option<GraphEdge> {
        lock(&self.state)
            .edges
            .get(&RegulationId::new(source.clone(), target.clone()))
            .cloned()
    }

    pub fn node_count(&self) -> usize {
        lock(&self.state).nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        lock(&self.state).edges.len()
    }

    /// Variables that were deleted before all of their edges were
    pub fn violations(&self) -> Vec<VariableId> {
        lock(&self.state).violations.clone()
    }

    pub fn selected_nodes(&self) -> Vec<VariableId> {
        lock(&self.state)
            .nodes
            .iter()
            .filter(|(_, node)| node.selected)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl std::fmt::Debug for GraphView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphView")
            .field("state", &self.state)
            .field("handles", &self.handles)
            .finish()
    }
}

fn lock(state: &Mutex<GraphState>) -> MutexGuard<'_, GraphState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
