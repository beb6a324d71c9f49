//! # Model Import
//!
//! Turns a parsed document into a deterministic sequence of live model
//! operations: clear the model, create every variable, then create every
//! regulation. Regulations are only created once all variables exist, because
//! the model rejects regulations with unknown endpoints.

use super::dialogs::Dialogs;
use super::formats::FormatResult;
use crate::editor::models::{LiveModel, ModelSnapshot, RegulationUpdate, VariableUpdate};

/// Error messages longer than this are cut off before the next entry
const MAX_MESSAGE_LENGTH: usize = 500;

const OVERWRITE_QUESTION: &str = "Overwrite current model?";
const LAYOUT_QUESTION: &str =
    "Model seems to be missing layout data. Do you want to apply an automatic layout now?";

/// Summary of a completed import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub variables: usize,
    pub regulations: usize,
    /// At least one variable received a position from the document
    pub layout_applied: bool,
    /// The user asked for an automatic layout of a layout-less model
    pub layout_requested: bool,
    /// Parser warnings and regulations that could not be created
    pub warnings: Vec<String>,
}

/// Result of an import attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// The document was unusable; the model was not touched
    Rejected { errors: Vec<String> },
    /// The user declined to overwrite the current model
    Declined,
    Imported(ImportReport),
}

/// Build the message shown to the user for errors or warnings of a parse
pub fn error_message<T>(result: &FormatResult<T>) -> String {
    let errors = result.errors();
    if errors.len() == 1 && result.is_fatal() {
        return format!("Import error: {}", errors[0].message);
    }

    let mut message = if result.is_fatal() {
        "Import failed: \n".to_string()
    } else {
        format!("Import successful with warnings ({}): \n", errors.len())
    };
    for error in errors {
        if message.len() > MAX_MESSAGE_LENGTH {
            message.push_str(" ... truncated ... ");
            return message;
        }
        message.push_str(&format!(" - {}\n", error.message));
    }
    message
}

/// Replace the contents of `model` with `snapshot`.
///
/// Positions come from the snapshot's layout metadata, keyed by variable name;
/// unreadable layout strings simply leave the variable unplaced.
pub fn apply_snapshot(model: &mut LiveModel, snapshot: &ModelSnapshot) -> ImportReport {
    model.clear();

    let mut report = ImportReport::default();
    for variable in &snapshot.variables {
        let mut update = VariableUpdate::new()
            .with_id(variable.id.clone())
            .with_name(variable.name.clone());
        if let Some(position) = snapshot.position_of(&variable.name) {
            update = update.with_position(position);
            report.layout_applied = true;
        }
        model.ensure_variable(update);
        report.variables += 1;
    }

    for regulation in &snapshot.regulations {
        let update = RegulationUpdate::new(regulation.source.clone(), regulation.target.clone())
            .observable(regulation.is_observable)
            .monotonicity(regulation.monotonicity.unwrap_or_default());
        match model.ensure_regulation(update) {
            Ok(()) => report.regulations += 1,
            Err(error) => {
                tracing::warn!("Skipping regulation during import: {}", error);
                report.warnings.push(error.to_string());
            }
        }
    }

    tracing::info!(
        "Imported {} variable(s) and {} regulation(s), layout applied: {}",
        report.variables,
        report.regulations,
        report.layout_applied
    );
    report
}

/// Import a parsed document, asking the user where the import is destructive.
///
/// Fatal parse errors are shown and nothing is changed. A non-empty model is
/// only overwritten after confirmation; warnings are always shown.
pub async fn import_parsed_model(
    model: &mut LiveModel,
    dialogs: &dyn Dialogs,
    parsed: FormatResult<ModelSnapshot>,
) -> ImportOutcome {
    let messages: Vec<String> = parsed
        .errors()
        .iter()
        .map(|error| error.message.clone())
        .collect();

    let snapshot = match &parsed.result {
        Some(snapshot) if !snapshot.variables.is_empty() => snapshot,
        Some(_) => {
            let errors = vec!["The model contains no variables.".to_string()];
            dialogs.alert(&format!("Import error: {}", errors[0])).await;
            return ImportOutcome::Rejected { errors };
        }
        None => {
            dialogs.alert(&error_message(&parsed)).await;
            return ImportOutcome::Rejected { errors: messages };
        }
    };

    if !model.is_empty() {
        let question = if messages.is_empty() {
            OVERWRITE_QUESTION.to_string()
        } else {
            format!("{}\n\n{}", error_message(&parsed), OVERWRITE_QUESTION)
        };
        if !dialogs.confirm(&question).await {
            tracing::info!("Import declined, keeping current model");
            return ImportOutcome::Declined;
        }
    } else if !messages.is_empty() {
        dialogs.alert(&error_message(&parsed)).await;
    }

    let mut report = apply_snapshot(model, snapshot);
    let mut warnings = messages;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;

    if !report.layout_applied {
        report.layout_requested = dialogs.confirm(LAYOUT_QUESTION).await;
    }
    ImportOutcome::Imported(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::events::{Monotonicity, Position, VariableId};
    use crate::editor::models::{RegulationEntry, VariableEntry};
    use crate::editor::services::dialogs::ScriptedDialogs;
    use crate::editor::services::formats::ErrorEntry;
    use serde_json::json;

    fn snapshot(layout: Option<&str>) -> ModelSnapshot {
        let mut metadata = serde_json::Map::new();
        if let Some(layout) = layout {
            metadata.insert("position".to_string(), json!({ "X": layout }));
        }
        ModelSnapshot {
            variables: vec![VariableEntry {
                id: "0".into(),
                name: "X".to_string(),
            }],
            regulations: vec![],
            metadata,
        }
    }

    #[test]
    fn layout_should_be_applied_by_name() {
        let mut model = LiveModel::default();

        let report = apply_snapshot(&mut model, &snapshot(Some("10,20")));

        assert!(report.layout_applied);
        assert_eq!(
            model.variable(&VariableId::from("0")).unwrap().position,
            Some(Position::new(10.0, 20.0))
        );
    }

    #[test]
    fn malformed_layout_should_leave_variable_unplaced() {
        let mut model = LiveModel::default();

        let report = apply_snapshot(&mut model, &snapshot(Some("abc")));

        assert!(!report.layout_applied);
        assert!(report.warnings.is_empty());
        let variable = model.variable(&VariableId::from("0")).unwrap();
        assert_eq!(variable.name, "X");
        assert_eq!(variable.position, None);
    }

    #[test]
    fn apply_should_replace_existing_model() {
        let mut model = LiveModel::default();
        model.ensure_variable(VariableUpdate::new().with_name("old"));
        model.ensure_variable(VariableUpdate::new().with_name("older"));

        apply_snapshot(&mut model, &snapshot(None));

        assert_eq!(model.variable_count(), 1);
        assert_eq!(model.find_variable("old"), None);
    }

    #[test]
    fn regulations_with_unknown_endpoints_should_become_warnings() {
        let mut model = LiveModel::default();
        let mut document = snapshot(None);
        document.regulations = vec![
            RegulationEntry {
                source: "0".into(),
                target: "0".into(),
                is_observable: true,
                monotonicity: Some(Monotonicity::Inhibition),
            },
            RegulationEntry {
                source: "0".into(),
                target: "9".into(),
                is_observable: false,
                monotonicity: None,
            },
        ];

        let report = apply_snapshot(&mut model, &document);

        assert_eq!(report.regulations, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            model
                .regulation(&"0".into(), &"0".into())
                .unwrap()
                .monotonicity,
            Monotonicity::Inhibition
        );
    }

    #[test]
    fn single_fatal_error_should_use_short_message() {
        let result: FormatResult<ModelSnapshot> =
            FormatResult::failed(vec![ErrorEntry::new("Unexpected token")]);

        assert_eq!(error_message(&result), "Import error: Unexpected token");
    }

    #[test]
    fn warnings_should_be_listed() {
        let result = FormatResult::with_warnings(
            snapshot(None),
            vec![ErrorEntry::new("first"), ErrorEntry::new("second")],
        );

        assert_eq!(
            error_message(&result),
            "Import successful with warnings (2): \n - first\n - second\n"
        );
    }

    #[test]
    fn long_error_lists_should_be_truncated() {
        let errors = (0..100)
            .map(|i| ErrorEntry::new(format!("problem number {i} in the document")))
            .collect();
        let result: FormatResult<ModelSnapshot> = FormatResult::failed(errors);

        let message = error_message(&result);

        assert!(message.starts_with("Import failed: \n"));
        assert!(message.ends_with(" ... truncated ... "));
        assert!(message.len() < MAX_MESSAGE_LENGTH + 60);
    }

    #[tokio::test]
    async fn fatal_parse_should_reject_without_mutation() {
        let mut model = LiveModel::default();
        model.ensure_variable(VariableUpdate::new().with_name("keep"));
        let dialogs = ScriptedDialogs::new();

        let outcome = import_parsed_model(
            &mut model,
            &dialogs,
            FormatResult::failed(vec![ErrorEntry::new("broken")]),
        )
        .await;

        assert_eq!(
            outcome,
            ImportOutcome::Rejected {
                errors: vec!["broken".to_string()]
            }
        );
        assert_eq!(model.find_variable("keep"), Some("0".into()));
        assert_eq!(dialogs.alerts(), vec!["Import error: broken".to_string()]);
    }

    #[tokio::test]
    async fn empty_document_should_be_rejected() {
        let mut model = LiveModel::default();
        let dialogs = ScriptedDialogs::new();

        let outcome =
            import_parsed_model(&mut model, &dialogs, FormatResult::ok(ModelSnapshot::default()))
                .await;

        assert!(matches!(outcome, ImportOutcome::Rejected { .. }));
    }

    #[tokio::test]
    async fn import_into_empty_model_should_not_ask_to_overwrite() {
        let mut model = LiveModel::default();
        let dialogs = ScriptedDialogs::new();

        let outcome =
            import_parsed_model(&mut model, &dialogs, FormatResult::ok(snapshot(Some("10,20"))))
                .await;

        match outcome {
            ImportOutcome::Imported(report) => assert!(report.layout_applied),
            other => panic!("Expected import, got {other:?}"),
        }
        assert!(dialogs.confirms().is_empty());
    }

    #[tokio::test]
    async fn declined_overwrite_should_keep_model() {
        let mut model = LiveModel::default();
        model.ensure_variable(VariableUpdate::new().with_name("keep"));
        let dialogs = ScriptedDialogs::new();
        dialogs.answer_confirms(&[false]);

        let outcome =
            import_parsed_model(&mut model, &dialogs, FormatResult::ok(snapshot(None))).await;

        assert_eq!(outcome, ImportOutcome::Declined);
        assert_eq!(dialogs.confirms(), vec![OVERWRITE_QUESTION.to_string()]);
        assert_eq!(model.find_variable("keep"), Some("0".into()));
    }

    #[tokio::test]
    async fn warnings_should_be_shown_and_reported() {
        let mut model = LiveModel::default();
        let dialogs = ScriptedDialogs::new();
        dialogs.answer_confirms(&[true]);

        let outcome = import_parsed_model(
            &mut model,
            &dialogs,
            FormatResult::with_warnings(snapshot(None), vec![ErrorEntry::new("odd")]),
        )
        .await;

        let ImportOutcome::Imported(report) = outcome else {
            panic!("Expected import");
        };
        assert_eq!(report.warnings, vec!["odd".to_string()]);
        assert!(report.layout_requested);
        assert_eq!(
            dialogs.alerts(),
            vec!["Import successful with warnings (1): \n - odd\n".to_string()]
        );
        assert_eq!(dialogs.confirms(), vec![LAYOUT_QUESTION.to_string()]);
    }
}
