//! # Model Events
//!
//! Events emitted by the live model when its state changes, plus the
//! ephemeral hover and selection signals that travel on the same bus.

use super::types::{Regulation, RegulationId, Selection, Variable, VariableId};
use std::fmt;

/// Closed set of channels on the model event bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Variable,
    VariableDelete,
    Regulation,
    RegulationDelete,
    VariableHover,
    RegulationHover,
    Selection,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Variable,
        Channel::VariableDelete,
        Channel::Regulation,
        Channel::RegulationDelete,
        Channel::VariableHover,
        Channel::RegulationHover,
        Channel::Selection,
    ];

    /// Wire name of the channel
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Variable => "variable",
            Channel::VariableDelete => "variable-delete",
            Channel::Regulation => "regulation",
            Channel::RegulationDelete => "regulation-delete",
            Channel::VariableHover => "variable.hover",
            Channel::RegulationHover => "regulation.hover",
            Channel::Selection => "selection",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events emitted when the live model changes
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A variable was created or updated; carries the full post-update entity
    Variable(Variable),

    /// A variable was removed, after all of its regulations
    VariableDeleted { id: VariableId },

    /// A regulation was created or updated
    Regulation(Regulation),

    /// A regulation was removed
    RegulationDeleted { id: RegulationId },

    /// Hover state of a variable changed
    VariableHovered { id: VariableId, hover: bool },

    /// Hover state of a regulation changed
    RegulationHovered { id: RegulationId, hover: bool },

    /// The set of selected elements changed
    SelectionChanged(Selection),
}

impl ModelEvent {
    /// The channel this event is delivered on
    pub fn channel(&self) -> Channel {
        match self {
            ModelEvent::Variable(_) => Channel::Variable,
            ModelEvent::VariableDeleted { .. } => Channel::VariableDelete,
            ModelEvent::Regulation(_) => Channel::Regulation,
            ModelEvent::RegulationDeleted { .. } => Channel::RegulationDelete,
            ModelEvent::VariableHovered { .. } => Channel::VariableHover,
            ModelEvent::RegulationHovered { .. } => Channel::RegulationHover,
            ModelEvent::SelectionChanged(_) => Channel::Selection,
        }
    }
}
