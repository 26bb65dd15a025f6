//! Validated, namespace-scoped access to a preference backend.
//!
//! [`PreferencesManager`] is built once per process and shared with its
//! consumers through `Arc`. Every operation validates the namespace name,
//! the raw access mode and the key before touching the backend, and no
//! failure reaches the caller: writes report `false`, reads fall back to the
//! supplied default and bulk reads return `None`.

use std::sync::Arc;

use {anyhow::Error, tracing::warn};

use crate::{
    config::settings::{GetAllModeCheck, KutilsSettings},
    error::{domain::PrefsError, operational::ErrorReporter},
    prefs::{
        backend::{MemoryPrefsBackend, PrefEdit, PrefMap, PrefsBackend},
        file_backend::JsonFilePrefsBackend,
        mode::AccessMode,
        namespace::Namespace,
        value::{PrefType, PrefValue},
    },
};

/// Process-wide preference store.
#[derive(Debug, Clone)]
pub struct PreferencesManager {
    /// Storage backend shared by all namespaces.
    backend: Arc<dyn PrefsBackend>,
    /// Mode validation applied by `get_all`.
    get_all_mode_check: GetAllModeCheck,
}

impl PreferencesManager {
    /// Creates a manager over an existing backend.
    pub fn new(backend: Arc<dyn PrefsBackend>) -> Self {
        Self {
            backend,
            get_all_mode_check: GetAllModeCheck::default(),
        }
    }

    /// Creates a manager over a fresh in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPrefsBackend::new()))
    }

    /// Creates a manager persisting to the directory named in `settings`.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::IoError` if the preference directory cannot be created.
    pub fn from_settings(settings: &KutilsSettings) -> Result<Self, PrefsError> {
        let backend = JsonFilePrefsBackend::new(settings.prefs_dir.clone())?;
        Ok(Self::new(Arc::new(backend)).with_get_all_mode_check(settings.get_all_mode_check))
    }

    /// Overrides the mode validation used by `get_all`.
    #[must_use]
    pub fn with_get_all_mode_check(mut self, check: GetAllModeCheck) -> Self {
        self.get_all_mode_check = check;
        self
    }

    /// Stores `value` under `key` and commits it.
    ///
    /// Returns `false` when validation or the commit fails; nothing is
    /// persisted in that case.
    pub fn put<T: PrefType>(&self, name: &str, mode: i32, key: &str, value: T) -> bool {
        let edit = PrefEdit::Put {
            key: key.to_string(),
            value: value.into_pref(),
        };
        self.commit_one(name, mode, key, edit, "put")
    }

    /// Loads the value under `key`, or `default` when it is missing, holds
    /// another type, or the arguments are invalid.
    pub fn get<T: PrefType>(&self, name: &str, mode: i32, key: &str, default: T) -> T {
        let Some(value) = self.get_value(name, mode, key) else {
            return default;
        };
        let kind = value.kind();
        T::from_pref(value).unwrap_or_else(|| {
            warn!(
                namespace = name,
                key = key,
                stored = kind,
                "Stored preference has a different type, using default"
            );
            default
        })
    }

    /// Loads the stored value under `key` whatever its type, or `None` when
    /// it is missing or the arguments are invalid.
    pub fn get_value(&self, name: &str, mode: i32, key: &str) -> Option<PrefValue> {
        let stored = validate(name, mode, key).and_then(|mode| self.backend.get(name, mode, key));
        match stored {
            Ok(value) => value,
            Err(error) => {
                report(error, "get", name, key);
                None
            }
        }
    }

    /// Loads every entry of a namespace, or `None` when the arguments are
    /// invalid or the backend fails.
    pub fn get_all(&self, name: &str, mode: i32) -> Option<PrefMap> {
        let entries = self
            .validate_bulk(name, mode)
            .and_then(|mode| self.backend.get_all(name, mode));
        match entries {
            Ok(entries) => Some(entries),
            Err(error) => {
                report(error, "get_all", name, "*");
                None
            }
        }
    }

    /// Deletes `key` and commits. Removing a missing key succeeds.
    pub fn remove(&self, name: &str, mode: i32, key: &str) -> bool {
        let edit = PrefEdit::Remove {
            key: key.to_string(),
        };
        self.commit_one(name, mode, key, edit, "remove")
    }

    /// Handle scoped to one of the fixed namespaces.
    #[must_use]
    pub fn namespace(&self, namespace: Namespace) -> NamespacePrefs<'_> {
        NamespacePrefs {
            manager: self,
            namespace,
        }
    }

    /// Handle for the default namespace.
    #[must_use]
    pub fn defaults(&self) -> NamespacePrefs<'_> {
        self.namespace(Namespace::Default)
    }

    /// Handle for the settings namespace.
    #[must_use]
    pub fn settings(&self) -> NamespacePrefs<'_> {
        self.namespace(Namespace::Settings)
    }

    /// Handle for the login namespace.
    #[must_use]
    pub fn login(&self) -> NamespacePrefs<'_> {
        self.namespace(Namespace::Login)
    }

    fn commit_one(&self, name: &str, mode: i32, key: &str, edit: PrefEdit, op: &str) -> bool {
        let result = validate(name, mode, key)
            .and_then(|mode| self.backend.commit(name, mode, std::slice::from_ref(&edit)));
        match result {
            Ok(()) => true,
            Err(error) => {
                report(error, op, name, key);
                false
            }
        }
    }

    fn validate_bulk(&self, name: &str, mode: i32) -> Result<AccessMode, PrefsError> {
        if name.is_empty() {
            return Err(PrefsError::EmptyName);
        }
        match self.get_all_mode_check {
            GetAllModeCheck::Strict => AccessMode::try_from(mode),
            GetAllModeCheck::AlwaysReject => Err(PrefsError::BulkReadRejected {
                name: name.to_string(),
            }),
        }
    }
}

/// Operations bound to one [`Namespace`].
#[derive(Debug, Clone, Copy)]
pub struct NamespacePrefs<'a> {
    manager: &'a PreferencesManager,
    namespace: Namespace,
}

impl NamespacePrefs<'_> {
    /// The namespace this handle addresses.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// See [`PreferencesManager::put`].
    pub fn put<T: PrefType>(&self, key: &str, value: T) -> bool {
        self.manager.put(
            self.namespace.store_name(),
            self.namespace.mode().raw(),
            key,
            value,
        )
    }

    /// See [`PreferencesManager::get`].
    pub fn get<T: PrefType>(&self, key: &str, default: T) -> T {
        self.manager.get(
            self.namespace.store_name(),
            self.namespace.mode().raw(),
            key,
            default,
        )
    }

    /// See [`PreferencesManager::get_value`].
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<PrefValue> {
        self.manager.get_value(
            self.namespace.store_name(),
            self.namespace.mode().raw(),
            key,
        )
    }

    /// See [`PreferencesManager::get_all`].
    #[must_use]
    pub fn get_all(&self) -> Option<PrefMap> {
        self.manager
            .get_all(self.namespace.store_name(), self.namespace.mode().raw())
    }

    /// See [`PreferencesManager::remove`].
    pub fn remove(&self, key: &str) -> bool {
        self.manager.remove(
            self.namespace.store_name(),
            self.namespace.mode().raw(),
            key,
        )
    }
}

/// Checks name, raw mode and key, in that order.
fn validate(name: &str, mode: i32, key: &str) -> Result<AccessMode, PrefsError> {
    if name.is_empty() {
        return Err(PrefsError::EmptyName);
    }
    let mode = AccessMode::try_from(mode)?;
    if key.is_empty() {
        return Err(PrefsError::EmptyKey);
    }
    Ok(mode)
}

fn report(error: PrefsError, op: &str, name: &str, key: &str) {
    let rejected = matches!(
        error,
        PrefsError::EmptyName
            | PrefsError::InvalidName { .. }
            | PrefsError::InvalidMode { .. }
            | PrefsError::EmptyKey
            | PrefsError::BulkReadRejected { .. }
    );
    let error = Error::from(error).context(format!("{op} {name}/{key}"));
    if rejected {
        ErrorReporter::debug(&error, op);
    } else {
        ErrorReporter::warn(&error, op);
    }
}
