//! TOML-based settings persistence for the console.
//!
//! Reads and writes [`ConsoleSettings`] at the platform-appropriate path:
//! - Windows:  `%APPDATA%\PosDev\settings.toml`
//! - Linux:    `$XDG_CONFIG_HOME/posdev/settings.toml` (or `~/.config/posdev`)
//! - macOS:    `~/Library/Application Support/PosDev/settings.toml`
//!
//! Example file:
//!
//! ```toml
//! log_level = "debug"
//! test_connection_delay_ms = 250
//! error_summary_limit = 5
//! default_enabled = false
//! ```
//!
//! Every field has a `#[serde(default = "...")]`, so an empty or partial file
//! is valid and a missing file means "all defaults".

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::application::device_form::FormOptions;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Console settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// How long the simulated backend takes to answer a connection test.
    #[serde(default = "default_test_connection_delay_ms")]
    pub test_connection_delay_ms: u64,
    /// Number of messages shown after a rejected submit.
    #[serde(default = "default_error_summary_limit")]
    pub error_summary_limit: usize,
    /// Initial "enabled" state of new devices.
    #[serde(default = "default_true")]
    pub default_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_test_connection_delay_ms() -> u64 {
    1500
}
fn default_error_summary_limit() -> usize {
    3
}
fn default_true() -> bool {
    true
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            test_connection_delay_ms: default_test_connection_delay_ms(),
            error_summary_limit: default_error_summary_limit(),
            default_enabled: default_true(),
        }
    }
}

impl ConsoleSettings {
    pub fn test_connection_delay(&self) -> Duration {
        Duration::from_millis(self.test_connection_delay_ms)
    }

    /// The subset of settings the device form reads.
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            error_summary_limit: self.error_summary_limit,
            default_enabled: self.default_enabled,
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Resolves the full path to the default settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    let dir = platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)?;
    Ok(dir.join("settings.toml"))
}

/// Loads settings from the default path.
///
/// # Errors
///
/// See [`load_settings_from`].
pub fn load_settings() -> Result<ConsoleSettings, SettingsError> {
    load_settings_from(&settings_file_path()?)
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<ConsoleSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "settings file missing, using defaults");
            Ok(ConsoleSettings::default())
        }
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `settings` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings_to(path: &Path, settings: &ConsoleSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("PosDev"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("posdev"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("PosDev")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
