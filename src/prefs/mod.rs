//! Namespaced, typed, persistent key/value preferences.
//!
//! Values live in one of three fixed namespaces (or any named store through
//! the raw API) and are written through a [`PrefsBackend`] with a
//! synchronous commit.

pub mod backend;
pub mod file_backend;
pub mod manager;
pub mod mode;
pub mod namespace;
pub mod value;

#[cfg(test)]
mod tests;

pub use {
    backend::{MemoryPrefsBackend, PrefEdit, PrefMap, PrefsBackend},
    file_backend::JsonFilePrefsBackend,
    manager::{NamespacePrefs, PreferencesManager},
    mode::AccessMode,
    namespace::{
        DEFAULT_NAMESPACE_NAME, LOGIN_NAMESPACE_NAME, Namespace, SETTINGS_NAMESPACE_NAME,
    },
    value::{PrefType, PrefValue},
};
