//! Crate settings and their on-disk location.
//!
//! This module provides settings management with XDG Base Directory
//! compliance for the config file and the preference data directory.

pub mod settings;

pub use settings::{
    GetAllModeCheck, KutilsSettings, SettingsError, SettingsManager, get_config_path,
    get_default_prefs_dir,
};
