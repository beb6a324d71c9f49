//! # Events Module
//!
//! Re-exports all event system components organized by category.

pub mod event_bus;
pub mod model_events;
pub mod types;
pub mod ui_events;

pub use event_bus::{EventBus, EventBusError, ListenerHandle, ModelEventHandler, SimpleEventBus};
pub use model_events::{Channel, ModelEvent};
pub use types::{
    Monotonicity, Position, Regulation, RegulationId, Selection, Variable, VariableId,
};
pub use ui_events::{EditorCommand, UnknownCommand};
