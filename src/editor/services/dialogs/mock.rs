//! # Scripted Dialogs for Testing
//!
//! Answers dialogs from a pre-programmed script and records every prompt so
//! tests can assert on what the user would have seen.

use super::Dialogs;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A dialog that was shown
#[derive(Debug, Clone, PartialEq)]
pub enum DialogRecord {
    Alert(String),
    Confirm(String),
    OpenFile(String),
    SaveFile { name: String, data: String },
}

#[derive(Debug, Default)]
struct Script {
    confirmations: VecDeque<bool>,
    files: VecDeque<String>,
    save_result: bool,
    history: Vec<DialogRecord>,
}

/// Dialogs answered from a script; unanswered confirmations default to `false`
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    script: Arc<Mutex<Script>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        let dialogs = Self::default();
        dialogs.script().save_result = true;
        dialogs
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue answers for the next confirmations
    pub fn answer_confirms(&self, answers: &[bool]) -> &Self {
        self.script().confirmations.extend(answers.iter().copied());
        self
    }

    /// Queue the contents of the next file picked
    pub fn provide_file(&self, contents: impl Into<String>) -> &Self {
        self.script().files.push_back(contents.into());
        self
    }

    /// Whether `save_file` reports success
    pub fn set_save_result(&self, saved: bool) -> &Self {
        self.script().save_result = saved;
        self
    }

    /// Every dialog shown so far, in order
    pub fn history(&self) -> Vec<DialogRecord> {
        self.script().history.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.history()
            .into_iter()
            .filter_map(|record| match record {
                DialogRecord::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.history()
            .into_iter()
            .filter_map(|record| match record {
                DialogRecord::Confirm(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Files passed to `save_file` as `(name, data)`
    pub fn saved_files(&self) -> Vec<(String, String)> {
        self.history()
            .into_iter()
            .filter_map(|record| match record {
                DialogRecord::SaveFile { name, data } => Some((name, data)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn alert(&self, message: &str) {
        self.script()
            .history
            .push(DialogRecord::Alert(message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        let mut script = self.script();
        script
            .history
            .push(DialogRecord::Confirm(message.to_string()));
        script.confirmations.pop_front().unwrap_or(false)
    }

    async fn open_file(&self, accept: &str) -> Option<String> {
        let mut script = self.script();
        script
            .history
            .push(DialogRecord::OpenFile(accept.to_string()));
        script.files.pop_front()
    }

    async fn save_file(&self, data: &str, suggested_name: &str) -> bool {
        let mut script = self.script();
        script.history.push(DialogRecord::SaveFile {
            name: suggested_name.to_string(),
            data: data.to_string(),
        });
        script.save_result
    }
}
