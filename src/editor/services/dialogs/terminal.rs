//! # Terminal Dialogs
//!
//! Dialogs for the command-line front end. Questions are asked on stdout and
//! answered on stdin; when stdin is not a terminal, confirmations fall back to
//! the `--yes` setting instead of blocking.

use super::Dialogs;
use crate::editor::services::formats::FormatError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Dialogs backed by the terminal and the file system
#[derive(Debug, Clone)]
pub struct TerminalDialogs {
    assume_yes: bool,
    interactive: bool,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    // Shared so that input buffered past one answer is still there for the next prompt
    stdin: Arc<Mutex<BufReader<Stdin>>>,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            interactive: atty::is(atty::Stream::Stdin),
            input_path: None,
            output_path: None,
            stdin: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()))),
        }
    }

    /// File returned by `open_file` instead of asking for a path
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// File written by `save_file` instead of asking for a path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Override terminal detection
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    async fn prompt(&self, question: &str) -> Option<String> {
        if !self.interactive {
            return None;
        }
        let mut stdout = tokio::io::stdout();
        stdout.write_all(question.as_bytes()).await.ok()?;
        stdout.flush().await.ok()?;

        let mut line = String::new();
        let mut stdin = self.stdin.lock().await;
        match stdin.read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    async fn resolve_path(&self, preset: &Option<PathBuf>, question: &str) -> Option<PathBuf> {
        if let Some(path) = preset {
            return Some(path.clone());
        }
        let answer = self.prompt(question).await?;
        if answer.is_empty() {
            return None;
        }
        Some(PathBuf::from(shellexpand::tilde(&answer).into_owned()))
    }
}

impl Default for TerminalDialogs {
    fn default() -> Self {
        Self::new(false)
    }
}

async fn read_model_file(path: &Path) -> Result<String, FormatError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FormatError::Io {
            path: path.display().to_string(),
            source,
        })
}

async fn write_model_file(path: &Path, data: &str) -> Result<(), FormatError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|source| FormatError::Io {
            path: path.display().to_string(),
            source,
        })
}

#[async_trait]
impl Dialogs for TerminalDialogs {
    async fn alert(&self, message: &str) {
        println!("{message}");
    }

    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            tracing::debug!("Auto-confirming: {}", message);
            return true;
        }
        match self.prompt(&format!("{message} [y/N] ")).await {
            Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            None => {
                tracing::debug!("No terminal to confirm '{}', declining", message);
                false
            }
        }
    }

    async fn open_file(&self, accept: &str) -> Option<String> {
        let path = self
            .resolve_path(&self.input_path, &format!("Model file ({accept}): "))
            .await?;
        match read_model_file(&path).await {
            Ok(contents) => Some(contents),
            Err(error) => {
                tracing::warn!("Cannot open model: {}", error);
                self.alert(&format!("File cannot be opened: {error}")).await;
                None
            }
        }
    }

    async fn save_file(&self, data: &str, suggested_name: &str) -> bool {
        let Some(path) = self
            .resolve_path(
                &self.output_path,
                &format!("Save as [{suggested_name}]: "),
            )
            .await
        else {
            return false;
        };
        match write_model_file(&path, data).await {
            Ok(()) => {
                tracing::info!("Saved {} bytes to '{}'", data.len(), path.display());
                true
            }
            Err(error) => {
                tracing::warn!("Cannot save model: {}", error);
                self.alert(&format!("File cannot be saved: {error}")).await;
                false
            }
        }
    }
}
