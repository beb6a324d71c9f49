//! # Models Module
//!
//! The live model store and the data shapes derived from it.

pub mod live_model;
pub mod snapshot;
pub mod validation;

pub use live_model::{LiveModel, ModelError, RegulationUpdate, VariableUpdate};
pub use snapshot::{ModelSnapshot, RegulationEntry, VariableEntry, POSITION_KEY};
pub use validation::{check_variable_name, is_valid_name, rename_variable, NameError};
