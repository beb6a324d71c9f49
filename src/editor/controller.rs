//! # Editor Controller
//!
//! The controller turns UI commands into live model operations. Commands are
//! taken one at a time from an unbounded channel and each one runs to
//! completion, dialogs included, before the next one starts. Bulk operations
//! such as import are therefore never interleaved with other mutations.

use crate::editor::events::{
    EditorCommand, Monotonicity, Position, Regulation, RegulationId, Selection, VariableId,
};
use crate::editor::models::{rename_variable, LiveModel, RegulationUpdate, VariableUpdate};
use crate::editor::services::{
    export_model, import_parsed_model, Dialogs, ExportOutcome, ImportOutcome, ModelFormat,
    ModelFormats,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

const BNET_WARNING: &str = "BoolNet support is currently experimental. You may encounter valid `.bnet` models which cannot be imported. Continue?";
const REMOVE_SELECTED_QUESTION: &str = "Remove selected graph elements?";

/// What a dispatched command ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Imported(ImportOutcome),
    Exported(ExportOutcome),
    VariableCreated(VariableId),
    /// The command ran and changed (or re-announced) model state
    Applied,
    /// Nothing to do: cancelled by the user or not applicable to the selection
    Skipped,
    /// The command was refused and the user was told why
    Rejected(String),
}

/// Executes editor commands against one live model
pub struct EditorController {
    model: LiveModel,
    formats: Arc<dyn ModelFormats>,
    dialogs: Arc<dyn Dialogs>,
}

impl EditorController {
    pub fn new(model: LiveModel, formats: Arc<dyn ModelFormats>, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            model,
            formats,
            dialogs,
        }
    }

    pub fn model(&self) -> &LiveModel {
        &self.model
    }

    /// Direct access for flows that bypass the command vocabulary
    pub fn model_mut(&mut self) -> &mut LiveModel {
        &mut self.model
    }

    pub fn into_model(self) -> LiveModel {
        self.model
    }

    /// Process commands until every sender is dropped
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<EditorCommand>) -> Result<()> {
        while let Some(command) = commands.recv().await {
            let name = command.to_string();
            match self.dispatch(command).await {
                Ok(outcome) => tracing::debug!("Command {} finished: {:?}", name, outcome),
                Err(error) => tracing::error!("Command {} failed: {:#}", name, error),
            }
        }
        tracing::debug!("Command channel closed, controller stopping");
        Ok(())
    }

    /// Execute a single command
    pub async fn dispatch(&mut self, command: EditorCommand) -> Result<CommandOutcome> {
        tracing::debug!("Dispatching {}", command);
        match command {
            EditorCommand::ImportModel(format) => self.import(format).await,
            EditorCommand::ExportModel(format) => Ok(CommandOutcome::Exported(
                export_model(
                    &self.model,
                    self.formats.as_ref(),
                    self.dialogs.as_ref(),
                    format,
                )
                .await,
            )),
            EditorCommand::RemoveSelected => self.remove_selected().await,
            EditorCommand::ToggleSelectedObservability => {
                self.update_selected_regulation(|current| {
                    RegulationUpdate::from_regulation(current).observable(!current.is_observable)
                })
            }
            EditorCommand::ToggleSelectedMonotonicity => {
                self.update_selected_regulation(|current| {
                    RegulationUpdate::from_regulation(current)
                        .monotonicity(current.monotonicity.cycle())
                })
            }
            EditorCommand::CreateVariable { position } => Ok(self.create_variable(position)),
            EditorCommand::RenameVariable { id, name } => self.rename(&id, &name).await,
            EditorCommand::MoveVariable { id, position } => Ok(self.move_variable(id, position)),
            EditorCommand::CreateRegulation { source, target } => {
                self.create_regulation(source, target)
            }
            EditorCommand::HoverVariable { id, hover } => {
                self.model.hover_variable(&id, hover);
                Ok(CommandOutcome::Applied)
            }
            EditorCommand::HoverRegulation { id, hover } => {
                self.model.hover_regulation(&id.source, &id.target, hover);
                Ok(CommandOutcome::Applied)
            }
            EditorCommand::Select(Selection {
                variables,
                regulations,
            }) => {
                self.model.selection(variables, regulations);
                Ok(CommandOutcome::Applied)
            }
        }
    }

    async fn import(&mut self, format: ModelFormat) -> Result<CommandOutcome> {
        if format == ModelFormat::Bnet && !self.dialogs.confirm(BNET_WARNING).await {
            return Ok(CommandOutcome::Skipped);
        }

        let Some(contents) = self.dialogs.open_file(format.accept_filter()).await else {
            tracing::debug!("No {} file selected", format);
            return Ok(CommandOutcome::Skipped);
        };

        let parsed = self.formats.read_model_string(format, &contents).await;
        let outcome = import_parsed_model(&mut self.model, self.dialogs.as_ref(), parsed).await;
        Ok(CommandOutcome::Imported(outcome))
    }

    async fn remove_selected(&mut self) -> Result<CommandOutcome> {
        let selection = self.model.current_selection();
        if selection.is_empty() {
            return Ok(CommandOutcome::Skipped);
        }
        if !self.dialogs.confirm(REMOVE_SELECTED_QUESTION).await {
            return Ok(CommandOutcome::Skipped);
        }

        for id in &selection.variables {
            self.model.delete_variable(id);
        }
        for id in &selection.regulations {
            self.model.delete_regulation(&id.source, &id.target);
        }
        self.model.selection(Vec::new(), Vec::new());
        Ok(CommandOutcome::Applied)
    }

    /// Apply `change` to the regulation when it is the only selected element
    fn update_selected_regulation(
        &mut self,
        change: impl FnOnce(&Regulation) -> RegulationUpdate,
    ) -> Result<CommandOutcome> {
        let selection = self.model.current_selection();
        let [id] = selection.regulations.as_slice() else {
            return Ok(CommandOutcome::Skipped);
        };
        let Some(regulation) = self.model.regulation(&id.source, &id.target) else {
            return Ok(CommandOutcome::Skipped);
        };

        let update = change(regulation);
        self.model
            .ensure_regulation(update)
            .with_context(|| format!("Failed to update regulation {} -> {}", id.source, id.target))?;
        Ok(CommandOutcome::Applied)
    }

    fn create_variable(&mut self, position: Option<Position>) -> CommandOutcome {
        let mut update = VariableUpdate::new();
        if let Some(position) = position {
            update = update.with_position(position);
        }
        CommandOutcome::VariableCreated(self.model.ensure_variable(update))
    }

    async fn rename(&mut self, id: &VariableId, name: &str) -> Result<CommandOutcome> {
        match rename_variable(&mut self.model, id, name) {
            Ok(()) => Ok(CommandOutcome::Applied),
            Err(error) => {
                let message = format!("Cannot rename variable: {error}");
                self.dialogs.alert(&message).await;
                Ok(CommandOutcome::Rejected(message))
            }
        }
    }

    fn move_variable(&mut self, id: VariableId, position: Position) -> CommandOutcome {
        if self.model.variable(&id).is_none() {
            return CommandOutcome::Skipped;
        }
        self.model
            .ensure_variable(VariableUpdate::new().with_id(id).with_position(position));
        CommandOutcome::Applied
    }

    /// New regulations drawn in the editor start observable with an unknown sign
    fn create_regulation(&mut self, source: VariableId, target: VariableId) -> Result<CommandOutcome> {
        let id = RegulationId::new(source.clone(), target.clone());
        self.model
            .ensure_regulation(
                RegulationUpdate::new(source, target)
                    .observable(true)
                    .monotonicity(Monotonicity::Unknown),
            )
            .with_context(|| format!("Failed to create regulation {} -> {}", id.source, id.target))?;
        Ok(CommandOutcome::Applied)
    }
}

impl std::fmt::Debug for EditorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorController")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
