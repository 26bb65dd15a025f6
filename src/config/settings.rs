//! Crate configuration with XDG Base Directory compliance.
//!
//! Settings are read from `$XDG_CONFIG_HOME/kutils/settings.json` and decide
//! where preference namespaces are stored and how the store validates bulk
//! reads.

use std::{
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Access-mode validation applied by bulk reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetAllModeCheck {
    /// Accept the same modes as every other operation.
    #[default]
    Strict,
    /// Reject every bulk read regardless of mode.
    AlwaysReject,
}

/// Serializable crate settings with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KutilsSettings {
    /// Directory holding one JSON file per preference namespace.
    pub prefs_dir: PathBuf,
    /// Mode validation used by `get_all`.
    pub get_all_mode_check: GetAllModeCheck,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for KutilsSettings {
    fn default() -> Self {
        Self {
            prefs_dir: get_default_prefs_dir(),
            get_all_mode_check: GetAllModeCheck::Strict,
            log_filter: "info".to_string(),
        }
    }
}

impl KutilsSettings {
    /// Checks values that serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for an empty preference directory
    /// or log filter.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.prefs_dir.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue {
                reason: "prefs_dir must not be empty".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(SettingsError::InvalidValue {
                reason: "log_filter must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Handles loading, saving, and validation of crate settings.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe settings storage.
    settings: RwLock<KutilsSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Creates a settings manager with the default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a settings manager with a custom config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk or fail
    /// validation.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings: KutilsSettings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str(&contents)?
        } else {
            debug!("Using default settings, no file at: {:?}", config_path);
            KutilsSettings::default()
        };
        settings.validate()?;

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, KutilsSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Validates, applies and saves new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the settings are invalid or cannot be saved.
    pub fn update_settings(&self, new_settings: KutilsSettings) -> Result<(), SettingsError> {
        new_settings.validate()?;
        *self.settings.write() = new_settings;
        self.save_settings()
    }

    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Path of the settings file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_home("XDG_CONFIG_HOME", ".config");
    config_dir.push("kutils");
    config_dir.push("settings.json");
    config_dir
}

/// Default directory for preference namespace files.
#[must_use]
pub fn get_default_prefs_dir() -> PathBuf {
    let mut data_dir = get_xdg_home("XDG_DATA_HOME", ".local/share");
    data_dir.push("kutils");
    data_dir.push("shared_prefs");
    data_dir
}

/// Resolves an XDG base directory from `env_var`, falling back to
/// `$HOME/<home_suffix>`.
fn get_xdg_home(env_var: &str, home_suffix: &str) -> PathBuf {
    if let Ok(dir) = var(env_var)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(home_suffix);
        return path;
    }

    PathBuf::from(".")
}
