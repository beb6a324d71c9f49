//! # Dialog Abstraction Layer
//!
//! The editor asks the user things (confirmations, files to open, where to
//! save) through the `Dialogs` trait, so orchestration code never depends on a
//! concrete front end.
//!
//! ```text
//! Production:  EditorController ──▶ TerminalDialogs ──▶ stdin / stdout / files
//! Testing:     EditorController ──▶ ScriptedDialogs ──▶ queued answers + recorded prompts
//! ```

use async_trait::async_trait;

pub mod mock;
pub mod terminal;

pub use mock::{DialogRecord, ScriptedDialogs};
pub use terminal::TerminalDialogs;

/// User-facing dialogs used by the editor
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Show a message and wait until it is dismissed
    async fn alert(&self, message: &str);

    /// Ask a yes/no question
    async fn confirm(&self, message: &str) -> bool;

    /// Let the user pick a file and return its contents; `None` when cancelled
    async fn open_file(&self, accept: &str) -> Option<String>;

    /// Offer `data` for saving; returns whether it was actually saved
    async fn save_file(&self, data: &str, suggested_name: &str) -> bool;
}
