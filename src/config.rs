//! Configuration constants and utilities for the editor
//!
//! Settings live in an INI file (`~/.aeon/config` by default) under the
//! `[editor]` section. Everything has a default, so a missing file is fine.

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;

/// Version of the editor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "~/.aeon/config";

/// Environment variable name for overriding the configuration path
pub const CONFIG_PATH_ENV_VAR: &str = "AEON_CONFIG_PATH";

/// Environment variable that forces debug mode on or off
pub const DEBUG_MODE_ENV_VAR: &str = "AEON_DEBUG_MODE";

/// Environment variable holding the log filter of the binary
pub const LOG_LEVEL_ENV_VAR: &str = "AEON_LOG_LEVEL";

const EDITOR_SECTION: &str = "editor";

/// Get the configuration file path, checking environment variable first, then falling back to default
pub fn get_config_path() -> String {
    let path = std::env::var_os(CONFIG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    shellexpand::tilde(&path).into_owned()
}

/// Editor settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Log bus traffic that nobody listens to
    pub debug_mode: bool,
}

impl EditorConfig {
    /// Load from the configured path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(get_config_path())?;
        if let Some(debug_mode) = std::env::var(DEBUG_MODE_ENV_VAR)
            .ok()
            .and_then(|value| parse_bool(&value))
        {
            config.debug_mode = debug_mode;
        }
        Ok(config)
    }

    /// Read an INI file; a missing file yields the defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No configuration at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read configuration '{}'", path.display()))?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut config = Self::default();
        let Some(section) = ini.section(Some(EDITOR_SECTION)) else {
            return config;
        };

        if let Some(value) = section.get("debug_mode") {
            match parse_bool(value) {
                Some(flag) => config.debug_mode = flag,
                None => tracing::warn!("Ignoring invalid debug_mode '{}'", value),
            }
        }
        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
