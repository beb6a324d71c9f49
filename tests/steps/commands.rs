//! Step definitions for selection based commands and the views

use crate::common::world::{parse_regulation_ids, EditorWorld};
use aeon_editor::{EditorCommand, Position, Selection, VariableId};
use cucumber::gherkin::Step;
use cucumber::{then, when};

#[when(regex = r#"^the user selects variables "([^"]*)" and regulations "([^"]*)"$"#)]
async fn when_user_selects(world: &mut EditorWorld, variables: String, regulations: String) {
    let variables = variables
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(VariableId::from)
        .collect();
    let selection = Selection {
        variables,
        regulations: parse_regulation_ids(&regulations),
    };
    world.run_command(EditorCommand::Select(selection)).await;
}

#[when(regex = r#"^the user renames variable "([^"]+)" to "([^"]*)"$"#)]
async fn when_user_renames(world: &mut EditorWorld, id: String, name: String) {
    world
        .run_command(EditorCommand::RenameVariable {
            id: id.into(),
            name,
        })
        .await;
}

#[when(regex = r#"^the user moves variable "([^"]+)" to (-?[\d.]+), (-?[\d.]+)$"#)]
async fn when_user_moves(world: &mut EditorWorld, id: String, x: f64, y: f64) {
    world
        .run_command(EditorCommand::MoveVariable {
            id: id.into(),
            position: Position::new(x, y),
        })
        .await;
}

#[when(regex = r#"^the user draws a regulation from "([^"]+)" to "([^"]+)"$"#)]
async fn when_user_draws_regulation(world: &mut EditorWorld, source: String, target: String) {
    world
        .run_command(EditorCommand::CreateRegulation {
            source: source.into(),
            target: target.into(),
        })
        .await;
}

#[then("the variables panel shows:")]
async fn then_panel_shows(world: &mut EditorWorld, step: &Step) {
    let expected = step.docstring.clone().unwrap_or_default();
    assert_eq!(world.panel.render(), expected.trim());
}

#[then(regex = r#"^the graph view shows variable "([^"]+)" as (selected|not selected)$"#)]
async fn then_graph_selection(world: &mut EditorWorld, id: String, state: String) {
    let node = world
        .graph
        .node(&id.into())
        .expect("node should be displayed");
    assert_eq!(node.selected, state == "selected");
}

#[then("the command failed")]
async fn then_command_failed(world: &mut EditorWorld) {
    assert!(world.last_error.is_some(), "{:?}", world.last_outcome);
}
