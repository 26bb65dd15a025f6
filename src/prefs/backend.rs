//! Backend contract for preference storage and the in-memory adapter.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    sync::Arc,
};

use parking_lot::RwLock;

use crate::{
    error::domain::PrefsError,
    prefs::{mode::AccessMode, value::PrefValue},
};

/// All entries of one namespace.
pub type PrefMap = BTreeMap<String, PrefValue>;

/// A single change applied by [`PrefsBackend::commit`].
#[derive(Debug, Clone, PartialEq)]
pub enum PrefEdit {
    /// Insert or overwrite a key.
    Put { key: String, value: PrefValue },
    /// Delete a key; deleting a missing key is not an error.
    Remove { key: String },
}

impl PrefEdit {
    /// Key touched by this edit.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// Persistent key/value storage keyed by namespace name and access mode.
///
/// Arguments are validated by the caller; implementations only deal with
/// storage concerns.
pub trait PrefsBackend: Debug + Send + Sync {
    /// Loads a single value.
    fn get(&self, name: &str, mode: AccessMode, key: &str)
    -> Result<Option<PrefValue>, PrefsError>;

    /// Loads every entry of a namespace. Unknown namespaces are empty.
    fn get_all(&self, name: &str, mode: AccessMode) -> Result<PrefMap, PrefsError>;

    /// Applies the edits in order and persists them before returning.
    fn commit(&self, name: &str, mode: AccessMode, edits: &[PrefEdit]) -> Result<(), PrefsError>;
}

/// Applies edits to an in-memory map.
pub(crate) fn apply_edits(map: &mut PrefMap, edits: &[PrefEdit]) {
    for edit in edits {
        match edit {
            PrefEdit::Put { key, value } => {
                map.insert(key.clone(), value.clone());
            }
            PrefEdit::Remove { key } => {
                map.remove(key);
            }
        }
    }
}

/// Volatile backend for tests and for processes without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefsBackend {
    namespaces: Arc<RwLock<HashMap<String, PrefMap>>>,
}

impl MemoryPrefsBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of namespaces that have received at least one commit.
    #[must_use]
    pub fn namespace_count(&self) -> usize {
        self.namespaces.read().len()
    }
}

impl PrefsBackend for MemoryPrefsBackend {
    fn get(
        &self,
        name: &str,
        _mode: AccessMode,
        key: &str,
    ) -> Result<Option<PrefValue>, PrefsError> {
        Ok(self
            .namespaces
            .read()
            .get(name)
            .and_then(|map| map.get(key))
            .cloned())
    }

    fn get_all(&self, name: &str, _mode: AccessMode) -> Result<PrefMap, PrefsError> {
        Ok(self
            .namespaces
            .read()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn commit(&self, name: &str, _mode: AccessMode, edits: &[PrefEdit]) -> Result<(), PrefsError> {
        let mut namespaces = self.namespaces.write();
        apply_edits(namespaces.entry(name.to_string()).or_default(), edits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::prefs::{
        backend::{MemoryPrefsBackend, PrefEdit, PrefsBackend},
        mode::AccessMode,
        value::PrefValue,
    };

    #[test]
    fn test_memory_backend_round_trip_and_remove() {
        let backend = MemoryPrefsBackend::new();
        let backend_obj: &dyn PrefsBackend = &backend;
        let mode = AccessMode::Private;

        assert_eq!(backend_obj.get("ns", mode, "k").unwrap(), None);
        assert_eq!(backend.namespace_count(), 0);

        backend_obj
            .commit(
                "ns",
                mode,
                &[PrefEdit::Put {
                    key: "k".to_string(),
                    value: PrefValue::Int(1),
                }],
            )
            .unwrap();
        assert_eq!(
            backend_obj.get("ns", mode, "k").unwrap(),
            Some(PrefValue::Int(1))
        );

        backend_obj
            .commit("ns", mode, &[PrefEdit::Remove { key: "k".to_string() }])
            .unwrap();
        assert!(backend_obj.get_all("ns", mode).unwrap().is_empty());
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let backend = MemoryPrefsBackend::new();
        let mode = AccessMode::Private;
        backend
            .commit(
                "a",
                mode,
                &[PrefEdit::Put {
                    key: "k".to_string(),
                    value: PrefValue::Bool(true),
                }],
            )
            .unwrap();

        assert_eq!(backend.get("b", mode, "k").unwrap(), None);
        assert_eq!(backend.get_all("a", mode).unwrap().len(), 1);
    }

    #[test]
    fn test_edits_apply_in_order() {
        let backend = MemoryPrefsBackend::new();
        let mode = AccessMode::Private;
        let edits = [
            PrefEdit::Put {
                key: "k".to_string(),
                value: PrefValue::Int(1),
            },
            PrefEdit::Remove { key: "k".to_string() },
            PrefEdit::Put {
                key: "k".to_string(),
                value: PrefValue::Int(2),
            },
        ];
        assert_eq!(edits[1].key(), "k");
        backend.commit("ns", mode, &edits).unwrap();
        assert_eq!(backend.get("ns", mode, "k").unwrap(), Some(PrefValue::Int(2)));
    }
}
