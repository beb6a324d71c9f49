//! Step definitions for importing and exporting models

use crate::common::world::EditorWorld;
use aeon_editor::editor::services::{
    import_parsed_model, ExportOutcome, FormatResult, ImportOutcome,
};
use aeon_editor::editor::models::VariableEntry;
use aeon_editor::{CommandOutcome, EditorCommand, ModelSnapshot};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde_json::{Map, Value};

#[given("the user will open a file containing:")]
async fn given_file_contents(world: &mut EditorWorld, step: &Step) {
    let contents = step.docstring.clone().unwrap_or_default();
    world.dialogs.provide_file(contents.trim_start_matches('\n'));
}

#[given(regex = r#"^the user will answer "(yes|no)" to the next confirmation$"#)]
async fn given_confirmation(world: &mut EditorWorld, answer: String) {
    world.dialogs.answer_confirms(&[answer == "yes"]);
}

#[given("the user will cancel saving")]
async fn given_cancel_saving(world: &mut EditorWorld) {
    world.dialogs.set_save_result(false);
}

#[when(regex = r#"^the user runs the "([a-z-]+)" command$"#)]
async fn when_user_runs_command(world: &mut EditorWorld, name: String) {
    let command: EditorCommand = name.parse().expect("known command");
    world.run_command(command).await;
}

#[when(regex = r#"^a parsed model with variable "([^"]+)" laid out at "([^"]*)" is imported$"#)]
async fn when_parsed_model_imported(world: &mut EditorWorld, name: String, layout: String) {
    let mut positions = Map::new();
    positions.insert(name.clone(), Value::String(layout));
    let mut metadata = Map::new();
    metadata.insert("position".to_string(), Value::Object(positions));
    let snapshot = ModelSnapshot {
        variables: vec![VariableEntry {
            id: "0".into(),
            name,
        }],
        regulations: Vec::new(),
        metadata,
    };

    let outcome = import_parsed_model(
        world.controller.model_mut(),
        &world.dialogs,
        FormatResult::ok(snapshot),
    )
    .await;
    world.last_outcome = Some(CommandOutcome::Imported(outcome));
}

#[then(regex = r"^the import reports layout applied (true|false)$")]
async fn then_layout_applied(world: &mut EditorWorld, applied: bool) {
    match &world.last_outcome {
        Some(CommandOutcome::Imported(ImportOutcome::Imported(report))) => {
            assert_eq!(report.layout_applied, applied);
        }
        other => panic!("Expected a completed import, got {other:?}"),
    }
}

#[then(regex = r"^the import reports (\d+) warnings?$")]
async fn then_import_warnings(world: &mut EditorWorld, count: usize) {
    match &world.last_outcome {
        Some(CommandOutcome::Imported(ImportOutcome::Imported(report))) => {
            assert_eq!(report.warnings.len(), count, "{:?}", report.warnings);
        }
        other => panic!("Expected a completed import, got {other:?}"),
    }
}

#[then("the import was declined")]
async fn then_import_declined(world: &mut EditorWorld) {
    assert_eq!(
        world.last_outcome,
        Some(CommandOutcome::Imported(ImportOutcome::Declined))
    );
}

#[then("the import was rejected")]
async fn then_import_rejected(world: &mut EditorWorld) {
    assert!(matches!(
        world.last_outcome,
        Some(CommandOutcome::Imported(ImportOutcome::Rejected { .. }))
    ));
}

#[then("the command was skipped")]
async fn then_command_skipped(world: &mut EditorWorld) {
    assert_eq!(world.last_outcome, Some(CommandOutcome::Skipped));
}

#[then("the export was cancelled")]
async fn then_export_cancelled(world: &mut EditorWorld) {
    assert_eq!(
        world.last_outcome,
        Some(CommandOutcome::Exported(ExportOutcome::Cancelled))
    );
}

#[then(regex = r#"^the user was alerted "([^"]*)"$"#)]
async fn then_user_alerted(world: &mut EditorWorld, message: String) {
    let alerts = world.dialogs.alerts();
    assert!(
        alerts.iter().any(|alert| alert.starts_with(&message)),
        "no alert starting with '{message}' in {alerts:?}"
    );
}

#[then("the user was not alerted")]
async fn then_no_alert(world: &mut EditorWorld) {
    assert!(world.dialogs.alerts().is_empty());
}

#[then(regex = r#"^the user was asked "([^"]*)"$"#)]
async fn then_user_asked(world: &mut EditorWorld, question: String) {
    let confirms = world.dialogs.confirms();
    assert!(
        confirms.iter().any(|asked| asked.starts_with(&question)),
        "no question starting with '{question}' in {confirms:?}"
    );
}

#[then(regex = r#"^a file "([^"]+)" was saved containing "([^"]*)"$"#)]
async fn then_file_saved(world: &mut EditorWorld, name: String, fragment: String) {
    let saved = world.dialogs.saved_files();
    assert!(
        saved
            .iter()
            .any(|(file, data)| *file == name && data.contains(&fragment)),
        "no file {name} containing '{fragment}' in {saved:?}"
    );
}
