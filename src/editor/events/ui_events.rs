//! # UI Events
//!
//! Commands dispatched by the user interface into the editor controller.
//! Named commands map 1:1 onto the click vocabulary of toolbar buttons and
//! hotkeys; structured commands carry the data of direct graph interactions.

use super::types::{Position, RegulationId, Selection, VariableId};
use crate::editor::services::formats::ModelFormat;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Commands the controller knows how to execute
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Open a file and replace the current model with its contents
    ImportModel(ModelFormat),

    /// Serialize the current model and offer it for saving
    ExportModel(ModelFormat),

    /// Remove every selected variable and regulation
    RemoveSelected,

    /// Flip observability of the single selected regulation
    ToggleSelectedObservability,

    /// Advance monotonicity of the single selected regulation
    ToggleSelectedMonotonicity,

    /// Create a new variable with a default name
    CreateVariable { position: Option<Position> },

    /// Rename a variable after validating the new name
    RenameVariable { id: VariableId, name: String },

    /// Move a variable on the canvas
    MoveVariable { id: VariableId, position: Position },

    /// Create a regulation with default properties
    CreateRegulation { source: VariableId, target: VariableId },

    /// Hover over (or leave) a variable
    HoverVariable { id: VariableId, hover: bool },

    /// Hover over (or leave) a regulation
    HoverRegulation { id: RegulationId, hover: bool },

    /// Replace the current selection
    Select(Selection),
}

/// Error returned when a click name is not part of the command vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown editor command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for EditorCommand {
    type Err = UnknownCommand;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let command = match name {
            "model-import-aeon" => EditorCommand::ImportModel(ModelFormat::Aeon),
            "model-import-sbml" => EditorCommand::ImportModel(ModelFormat::Sbml),
            "model-import-bnet" => EditorCommand::ImportModel(ModelFormat::Bnet),
            "model-export-aeon" => EditorCommand::ExportModel(ModelFormat::Aeon),
            "model-export-sbml" => EditorCommand::ExportModel(ModelFormat::Sbml),
            "selected-remove" => EditorCommand::RemoveSelected,
            "selected-toggle-observability" => EditorCommand::ToggleSelectedObservability,
            "selected-toggle-monotonicity" => EditorCommand::ToggleSelectedMonotonicity,
            _ => return Err(UnknownCommand(name.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorCommand::ImportModel(format) => write!(f, "model-import-{}", format.name()),
            EditorCommand::ExportModel(format) => write!(f, "model-export-{}", format.name()),
            EditorCommand::RemoveSelected => f.write_str("selected-remove"),
            EditorCommand::ToggleSelectedObservability => {
                f.write_str("selected-toggle-observability")
            }
            EditorCommand::ToggleSelectedMonotonicity => {
                f.write_str("selected-toggle-monotonicity")
            }
            EditorCommand::CreateVariable { .. } => f.write_str("create-variable"),
            EditorCommand::RenameVariable { id, .. } => write!(f, "rename-variable({id})"),
            EditorCommand::MoveVariable { id, .. } => write!(f, "move-variable({id})"),
            EditorCommand::CreateRegulation { source, target } => {
                write!(f, "create-regulation({source}->{target})")
            }
            EditorCommand::HoverVariable { id, .. } => write!(f, "hover-variable({id})"),
            EditorCommand::HoverRegulation { id, .. } => {
                write!(f, "hover-regulation({}->{})", id.source, id.target)
            }
            EditorCommand::Select(_) => f.write_str("select"),
        }
    }
}
