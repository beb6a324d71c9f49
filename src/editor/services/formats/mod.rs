//! # Model Formats
//!
//! Boundary between the editor and the readers/writers of external model
//! formats. The editor only ever sees `FormatResult` envelopes: a `result`
//! without `error` is a clean success, a `result` with `error` is a success with
//! warnings, and an `error` alone is a fatal failure.

pub mod aeon;
pub mod bnet;

use crate::editor::models::ModelSnapshot;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported external model formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    Aeon,
    Sbml,
    Bnet,
}

impl ModelFormat {
    /// Short name used in command names and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Aeon => "aeon",
            ModelFormat::Sbml => "sbml",
            ModelFormat::Bnet => "bnet",
        }
    }

    /// Default file extension, including the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Aeon => ".aeon",
            ModelFormat::Sbml => ".sbml",
            ModelFormat::Bnet => ".bnet",
        }
    }

    /// File picker accept filter
    pub fn accept_filter(&self) -> &'static str {
        match self {
            ModelFormat::Sbml => ".sbml,.xml",
            other => other.extension(),
        }
    }

    /// Guess the format from a file name
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "aeon" => Some(ModelFormat::Aeon),
            "sbml" | "xml" => Some(ModelFormat::Sbml),
            "bnet" => Some(ModelFormat::Bnet),
            _ => None,
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a format name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model format '{0}' (expected aeon, sbml or bnet)")]
pub struct UnknownFormat(pub String);

impl FromStr for ModelFormat {
    type Err = UnknownFormat;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "aeon" => Ok(ModelFormat::Aeon),
            "sbml" | "xml" => Ok(ModelFormat::Sbml),
            "bnet" => Ok(ModelFormat::Bnet),
            _ => Err(UnknownFormat(name.to_string())),
        }
    }
}

/// A single error or warning reported by a reader or writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl ErrorEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            html: None,
        }
    }
}

/// Result envelope of a reader or writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatResult<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<ErrorEntry>>,
}

impl<T> FormatResult<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(errors: Vec<ErrorEntry>) -> Self {
        Self {
            result: None,
            error: Some(errors),
        }
    }

    /// A result, plus warnings if there are any
    pub fn with_warnings(result: T, warnings: Vec<ErrorEntry>) -> Self {
        Self {
            result: Some(result),
            error: if warnings.is_empty() {
                None
            } else {
                Some(warnings)
            },
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.result.is_none()
    }

    /// Errors of a failed result, or warnings of a successful one
    pub fn errors(&self) -> &[ErrorEntry] {
        self.error.as_deref().unwrap_or(&[])
    }
}

impl<T: DeserializeOwned> FormatResult<T> {
    /// Decode the JSON envelope produced by an external parser bridge
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Failures outside of the model content itself
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to decode parser response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Readers and writers of model formats
#[async_trait]
pub trait ModelFormats: Send + Sync {
    async fn read_model_string(&self, format: ModelFormat, model: &str)
        -> FormatResult<ModelSnapshot>;

    async fn write_model_string(
        &self,
        format: ModelFormat,
        model: &ModelSnapshot,
    ) -> FormatResult<String>;
}

/// Formats implemented in this crate: `.aeon` read/write and `.bnet` read
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormats;

impl BuiltinFormats {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelFormats for BuiltinFormats {
    async fn read_model_string(
        &self,
        format: ModelFormat,
        model: &str,
    ) -> FormatResult<ModelSnapshot> {
        tracing::debug!("Reading {} model ({} bytes)", format, model.len());
        match format {
            ModelFormat::Aeon => aeon::read_model(model),
            ModelFormat::Bnet => bnet::read_model(model),
            ModelFormat::Sbml => unsupported(format, "reading"),
        }
    }

    async fn write_model_string(
        &self,
        format: ModelFormat,
        model: &ModelSnapshot,
    ) -> FormatResult<String> {
        tracing::debug!(
            "Writing {} model with {} variable(s)",
            format,
            model.variables.len()
        );
        match format {
            ModelFormat::Aeon => aeon::write_model(model),
            ModelFormat::Sbml | ModelFormat::Bnet => unsupported(format, "writing"),
        }
    }
}

fn unsupported<T>(format: ModelFormat, action: &str) -> FormatResult<T> {
    FormatResult::failed(vec![ErrorEntry::new(format!(
        "{} of {} models is not supported by this build.",
        capitalize(action),
        format.extension()
    ))])
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
