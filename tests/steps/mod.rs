//! Step definitions for Cucumber tests
//!
//! Steps are organized by feature domain:
//! - `model` - direct live model operations and event ordering
//! - `import_export` - file import, export and their dialogs
//! - `commands` - selection based editor commands and views

pub mod commands;
pub mod import_export;
pub mod model;
