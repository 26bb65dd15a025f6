//! KUtils - Preferences and Everyday Utilities
//!
//! A typed, namespaced key/value preference store with synchronous JSON file
//! persistence, together with the small helpers applications keep rewriting:
//! charset and digest codecs, file management, timestamp formatting, screen
//! unit and byte count conversions.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod files;
pub mod prefs;
pub mod time;
pub mod units;

// Re-export key types for convenience
pub use {
    codec::Charset,
    config::{KutilsSettings, SettingsManager},
    error::{CodecError, FilesError, PrefsError, TimeError},
    prefs::{AccessMode, Namespace, PrefValue, PreferencesManager, PrefsBackend},
    units::DisplayMetrics,
};
