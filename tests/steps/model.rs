//! Step definitions for live model operations

use crate::common::world::{parse_regulation_kind, EditorWorld};
use aeon_editor::{Position, RegulationUpdate, VariableId, VariableUpdate};
use cucumber::{given, then, when};

#[given(regex = r#"^a variable "([^"]+)" with id "([^"]+)"$"#)]
async fn given_variable_with_id(world: &mut EditorWorld, name: String, id: String) {
    world
        .controller
        .model_mut()
        .ensure_variable(VariableUpdate::new().with_id(id).with_name(name));
}

#[given(regex = r#"^an? (observable|unobservable) (activation|inhibition|unknown) regulation from "([^"]+)" to "([^"]+)"$"#)]
async fn given_regulation(
    world: &mut EditorWorld,
    observability: String,
    monotonicity: String,
    source: String,
    target: String,
) {
    let (observable, monotonicity) = parse_regulation_kind(&observability, &monotonicity);
    world
        .controller
        .model_mut()
        .ensure_regulation(
            RegulationUpdate::new(source, target)
                .observable(observable)
                .monotonicity(monotonicity),
        )
        .expect("regulation endpoints should exist");
}

#[given("no events have been recorded")]
async fn given_no_events(world: &mut EditorWorld) {
    world.forget_events();
}

#[when(regex = r#"^I create a variable without an id$"#)]
async fn when_create_variable(world: &mut EditorWorld) {
    let id = world
        .controller
        .model_mut()
        .ensure_variable(VariableUpdate::new());
    world.last_error = None;
    world.last_outcome = Some(aeon_editor::CommandOutcome::VariableCreated(id));
}

#[when(regex = r#"^I delete variable "([^"]+)"$"#)]
async fn when_delete_variable(world: &mut EditorWorld, id: String) {
    world
        .controller
        .model_mut()
        .delete_variable(&VariableId::from(id));
}

#[when("I clear the model")]
async fn when_clear_model(world: &mut EditorWorld) {
    world.controller.model_mut().clear();
}

#[when(regex = r#"^I ensure a regulation from "([^"]+)" to "([^"]+)"$"#)]
async fn when_ensure_regulation(world: &mut EditorWorld, source: String, target: String) {
    let result = world
        .controller
        .model_mut()
        .ensure_regulation(RegulationUpdate::new(source, target));
    world.last_error = result.err().map(|error| error.to_string());
}

#[when(regex = r#"^I update the regulation from "([^"]+)" to "([^"]+)" without a monotonicity$"#)]
async fn when_update_without_monotonicity(world: &mut EditorWorld, source: String, target: String) {
    let result = world
        .controller
        .model_mut()
        .ensure_regulation(RegulationUpdate::new(source, target));
    world.last_error = result.err().map(|error| error.to_string());
}

#[when(regex = r#"^I hover variable "([^"]+)"$"#)]
async fn when_hover_variable(world: &mut EditorWorld, id: String) {
    world.model().hover_variable(&VariableId::from(id), true);
}

#[then(regex = r"^the model has (\d+) variables? and (\d+) regulations?$")]
async fn then_model_counts(world: &mut EditorWorld, variables: usize, regulations: usize) {
    assert_eq!(world.model().variable_count(), variables);
    assert_eq!(world.model().regulation_count(), regulations);
}

#[then(regex = r#"^the new variable has id "([^"]+)" and name "([^"]+)"$"#)]
async fn then_new_variable(world: &mut EditorWorld, id: String, name: String) {
    let Some(aeon_editor::CommandOutcome::VariableCreated(created)) = &world.last_outcome else {
        panic!("No variable was created: {:?}", world.last_outcome);
    };
    assert_eq!(created.as_str(), id);
    assert_eq!(world.model().variable(created).unwrap().name, name);
}

#[then(regex = r#"^the emitted model events were "([^"]*)"$"#)]
async fn then_emitted_events(world: &mut EditorWorld, expected: String) {
    let expected: Vec<String> = expected
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    assert_eq!(world.mutation_channels(), expected);
}

#[then("no event was emitted")]
async fn then_no_event(world: &mut EditorWorld) {
    assert!(world.events.lock().unwrap().is_empty());
}

#[then(regex = r#"^the operation failed with unknown variable "([^"]+)"$"#)]
async fn then_unknown_endpoint(world: &mut EditorWorld, missing: String) {
    let error = world.last_error.as_deref().expect("operation should fail");
    assert!(
        error.contains(&format!("unknown variable '{missing}'")),
        "unexpected error: {error}"
    );
}

#[then(regex = r#"^the regulation from "([^"]+)" to "([^"]+)" is (observable|unobservable) (activation|inhibition|unknown)$"#)]
async fn then_regulation_is(
    world: &mut EditorWorld,
    source: String,
    target: String,
    observability: String,
    monotonicity: String,
) {
    let (observable, monotonicity) = parse_regulation_kind(&observability, &monotonicity);
    let regulation = world
        .model()
        .regulation(&source.into(), &target.into())
        .expect("regulation should exist");
    assert_eq!(regulation.is_observable, observable);
    assert_eq!(regulation.monotonicity, monotonicity);
}

#[then(regex = r#"^variable "([^"]+)" is at (-?[\d.]+), (-?[\d.]+)$"#)]
async fn then_variable_position(world: &mut EditorWorld, id: String, x: f64, y: f64) {
    let variable = world.model().variable(&id.into()).expect("variable should exist");
    assert_eq!(variable.position, Some(Position::new(x, y)));
}

#[then(regex = r#"^variable "([^"]+)" has no position$"#)]
async fn then_variable_without_position(world: &mut EditorWorld, id: String) {
    let variable = world.model().variable(&id.into()).expect("variable should exist");
    assert_eq!(variable.position, None);
}

#[then(regex = r#"^variable "([^"]+)" is named "([^"]+)"$"#)]
async fn then_variable_named(world: &mut EditorWorld, id: String, name: String) {
    let variable = world.model().variable(&id.into()).expect("variable should exist");
    assert_eq!(variable.name, name);
}

#[then("the graph view never saw a dangling edge")]
async fn then_no_dangling_edges(world: &mut EditorWorld) {
    assert!(world.graph.violations().is_empty());
    assert_eq!(world.graph.node_count(), world.model().variable_count());
    assert_eq!(world.graph.edge_count(), world.model().regulation_count());
}
