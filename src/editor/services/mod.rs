//! # Services Module
//!
//! Boundaries to the outside world (dialogs and model formats) and the import
//! and export flows built on top of them.

pub mod dialogs;
pub mod export;
pub mod formats;
pub mod import;

pub use dialogs::{DialogRecord, Dialogs, ScriptedDialogs, TerminalDialogs};
pub use export::{export_model, suggested_file_name, ExportOutcome};
pub use formats::{
    BuiltinFormats, ErrorEntry, FormatError, FormatResult, ModelFormat, ModelFormats,
    UnknownFormat,
};
pub use import::{apply_snapshot, error_message, import_parsed_model, ImportOutcome, ImportReport};
