//! # Model Export
//!
//! Serializes the live model through a format writer and offers the result to
//! the user for saving.

use super::dialogs::Dialogs;
use super::formats::{FormatResult, ModelFormat, ModelFormats};
use crate::editor::models::LiveModel;

const EMPTY_MODEL_MESSAGE: &str = "The model is empty. There is nothing to export.";

/// Result of an export attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Nothing was written, either because the model is empty or the writer failed
    Failed { errors: Vec<String> },
    /// The user dismissed the save dialog
    Cancelled,
    Saved { warnings: Vec<String> },
}

/// File name offered in the save dialog
pub fn suggested_file_name(format: ModelFormat) -> String {
    format!("model{}", format.extension())
}

fn messages<T>(result: &FormatResult<T>) -> Vec<String> {
    result
        .errors()
        .iter()
        .map(|error| error.message.clone())
        .collect()
}

fn export_message(header: &str, errors: &[String]) -> String {
    let mut message = format!("{header} ({}): \n", errors.len());
    for error in errors {
        message.push_str(&format!(" - {error}\n"));
    }
    message
}

/// Export the live model in the given format
pub async fn export_model(
    model: &LiveModel,
    formats: &dyn ModelFormats,
    dialogs: &dyn Dialogs,
    format: ModelFormat,
) -> ExportOutcome {
    if model.is_empty() {
        dialogs.alert(EMPTY_MODEL_MESSAGE).await;
        return ExportOutcome::Failed {
            errors: vec![EMPTY_MODEL_MESSAGE.to_string()],
        };
    }

    let written = formats
        .write_model_string(format, &model.snapshot())
        .await;
    let errors = messages(&written);

    let Some(data) = written.result else {
        tracing::warn!("Export to {} failed: {:?}", format, errors);
        dialogs
            .alert(&export_message("Export failed", &errors))
            .await;
        return ExportOutcome::Failed { errors };
    };

    if !errors.is_empty() {
        dialogs
            .alert(&export_message("Export finished with warnings", &errors))
            .await;
    }

    if dialogs
        .save_file(&data, &suggested_file_name(format))
        .await
    {
        tracing::info!("Exported model as {} ({} bytes)", format, data.len());
        ExportOutcome::Saved { warnings: errors }
    } else {
        tracing::info!("Export to {} cancelled", format);
        ExportOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::events::Position;
    use crate::editor::models::{RegulationUpdate, VariableUpdate};
    use crate::editor::services::dialogs::ScriptedDialogs;
    use crate::editor::services::formats::BuiltinFormats;

    fn two_variable_model() -> LiveModel {
        let mut model = LiveModel::default();
        let a = model.ensure_variable(VariableUpdate::new().with_name("A"));
        let b = model.ensure_variable(
            VariableUpdate::new()
                .with_name("B")
                .with_position(Position::new(1.0, 2.0)),
        );
        model
            .ensure_regulation(RegulationUpdate::new(a, b).observable(true))
            .unwrap();
        model
    }

    #[test]
    fn suggested_name_should_use_format_extension() {
        assert_eq!(suggested_file_name(ModelFormat::Aeon), "model.aeon");
        assert_eq!(suggested_file_name(ModelFormat::Sbml), "model.sbml");
    }

    #[tokio::test]
    async fn empty_model_should_not_be_exported() {
        let dialogs = ScriptedDialogs::new();

        let outcome = export_model(
            &LiveModel::default(),
            &BuiltinFormats::new(),
            &dialogs,
            ModelFormat::Aeon,
        )
        .await;

        assert!(matches!(outcome, ExportOutcome::Failed { .. }));
        assert_eq!(dialogs.alerts(), vec![EMPTY_MODEL_MESSAGE.to_string()]);
        assert!(dialogs.saved_files().is_empty());
    }

    #[tokio::test]
    async fn aeon_export_should_offer_file_for_saving() {
        let dialogs = ScriptedDialogs::new();

        let outcome = export_model(
            &two_variable_model(),
            &BuiltinFormats::new(),
            &dialogs,
            ModelFormat::Aeon,
        )
        .await;

        assert_eq!(outcome, ExportOutcome::Saved { warnings: vec![] });
        let saved = dialogs.saved_files();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "model.aeon");
        assert!(saved[0].1.contains("#position:B:1,2"));
        assert!(saved[0].1.contains("A -? B"));
    }

    #[tokio::test]
    async fn warnings_should_be_alerted_and_file_still_saved() {
        let mut model = two_variable_model();
        model.ensure_variable(VariableUpdate::new().with_name("Lonely"));
        let dialogs = ScriptedDialogs::new();

        let outcome =
            export_model(&model, &BuiltinFormats::new(), &dialogs, ModelFormat::Aeon).await;

        let ExportOutcome::Saved { warnings } = outcome else {
            panic!("Expected a saved export");
        };
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Lonely"));
        assert!(dialogs.alerts()[0].starts_with("Export finished with warnings (1)"));
        assert_eq!(dialogs.saved_files().len(), 1);
    }

    #[tokio::test]
    async fn writer_failure_should_be_alerted() {
        let dialogs = ScriptedDialogs::new();

        let outcome = export_model(
            &two_variable_model(),
            &BuiltinFormats::new(),
            &dialogs,
            ModelFormat::Sbml,
        )
        .await;

        assert!(matches!(outcome, ExportOutcome::Failed { .. }));
        assert_eq!(dialogs.alerts().len(), 1);
        assert!(dialogs.alerts()[0].starts_with("Export failed (1)"));
        assert!(dialogs.saved_files().is_empty());
    }

    #[tokio::test]
    async fn cancelled_save_should_be_reported() {
        let dialogs = ScriptedDialogs::new();
        dialogs.set_save_result(false);

        let outcome = export_model(
            &two_variable_model(),
            &BuiltinFormats::new(),
            &dialogs,
            ModelFormat::Aeon,
        )
        .await;

        assert_eq!(outcome, ExportOutcome::Cancelled);
    }
}
