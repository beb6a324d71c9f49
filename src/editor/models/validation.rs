//! Variable name validation
//!
//! The live model stores whatever name it is given. Flows that let the user
//! pick a name go through `rename_variable`, which rejects invalid or duplicate
//! names before the model is touched.

use super::live_model::{LiveModel, ModelError, VariableUpdate};
use crate::editor::events::VariableId;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Reasons a variable name is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Invalid variable name '{0}'. Name can only contain letters, numbers and `_`, `{{`, `}}`.")]
    InvalidCharacters(String),

    #[error("Invalid variable name '{0}'. Variable with this name already exists.")]
    AlreadyExists(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_{}]+$").expect("valid name pattern"))
}

/// Whether `name` only uses characters allowed in variable names
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name)
}

/// Check that `name` is a valid, unused name for the variable `id`.
///
/// The variable's own current name is not considered a duplicate.
pub fn check_variable_name(
    model: &LiveModel,
    id: &VariableId,
    name: &str,
) -> Result<(), NameError> {
    if !is_valid_name(name) {
        return Err(NameError::InvalidCharacters(name.to_string()));
    }
    let taken = model
        .variables()
        .any(|variable| variable.name == name && variable.id != *id);
    if taken {
        return Err(NameError::AlreadyExists(name.to_string()));
    }
    Ok(())
}

/// Validate and apply a new name; the model is unchanged on error
pub fn rename_variable(
    model: &mut LiveModel,
    id: &VariableId,
    name: &str,
) -> Result<(), NameError> {
    if model.variable(id).is_none() {
        return Err(ModelError::UnknownVariable(id.clone()).into());
    }
    check_variable_name(model, id, name)?;
    model.ensure_variable(VariableUpdate::new().with_id(id.clone()).with_name(name));
    Ok(())
}
