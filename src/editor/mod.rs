//! # Editor Module
//!
//! The editor core: a live model, the event bus it announces changes on, the
//! views following it, and the controller that turns commands into mutations.

pub mod controller;
pub mod events;
pub mod models;
pub mod services;
pub mod views;

pub use controller::{CommandOutcome, EditorController};
pub use events::{
    Channel, EditorCommand, EventBus, EventBusError, ListenerHandle, ModelEvent, Monotonicity,
    Position, Regulation, RegulationId, Selection, SimpleEventBus, Variable, VariableId,
};
pub use models::{LiveModel, ModelError, ModelSnapshot, NameError, RegulationUpdate, VariableUpdate};
pub use views::{GraphView, VariablesPanel};
