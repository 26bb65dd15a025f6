//! Tests for the preference manager.
//!
//! These cover validation, typed round trips, namespace isolation and the
//! sentinel values returned on backend failure.

use std::{collections::BTreeSet, io::Error, io::ErrorKind::PermissionDenied, sync::Arc};

use tempfile::TempDir;

use crate::{
    config::settings::{GetAllModeCheck, KutilsSettings},
    error::domain::PrefsError,
    prefs::{
        AccessMode, MemoryPrefsBackend, Namespace, PrefEdit, PrefMap, PrefValue,
        PreferencesManager, PrefsBackend, SETTINGS_NAMESPACE_NAME,
    },
};

const PRIVATE: i32 = AccessMode::PRIVATE;

/// Backend whose reads succeed but whose commits always fail.
#[derive(Debug, Default)]
struct ReadOnlyBackend {
    inner: MemoryPrefsBackend,
}

impl PrefsBackend for ReadOnlyBackend {
    fn get(
        &self,
        name: &str,
        mode: AccessMode,
        key: &str,
    ) -> Result<Option<PrefValue>, PrefsError> {
        self.inner.get(name, mode, key)
    }

    fn get_all(&self, name: &str, mode: AccessMode) -> Result<PrefMap, PrefsError> {
        self.inner.get_all(name, mode)
    }

    fn commit(&self, _name: &str, _mode: AccessMode, _edits: &[PrefEdit]) -> Result<(), PrefsError> {
        Err(PrefsError::IoError(Error::new(PermissionDenied, "read-only")))
    }
}

#[test]
fn test_put_then_get_returns_stored_value() {
    let prefs = PreferencesManager::in_memory();
    let defaults = prefs.defaults();

    assert!(defaults.put("name", "alice".to_string()));
    assert_eq!(defaults.get("name", "bob".to_string()), "alice");
}

#[test]
fn test_every_value_type_round_trips() {
    let prefs = PreferencesManager::in_memory();
    let name = "typed";
    let tags: BTreeSet<String> = ["x", "y"].into_iter().map(String::from).collect();

    assert!(prefs.put(name, PRIVATE, "bool", true));
    assert!(prefs.put(name, PRIVATE, "int", -12_i32));
    assert!(prefs.put(name, PRIVATE, "long", i64::MAX));
    assert!(prefs.put(name, PRIVATE, "float", 0.25_f32));
    assert!(prefs.put(name, PRIVATE, "string", "text".to_string()));
    assert!(prefs.put(name, PRIVATE, "set", tags.clone()));

    assert!(prefs.get(name, PRIVATE, "bool", false));
    assert_eq!(prefs.get(name, PRIVATE, "int", 0_i32), -12);
    assert_eq!(prefs.get(name, PRIVATE, "long", 0_i64), i64::MAX);
    assert_eq!(prefs.get(name, PRIVATE, "float", 0.0_f32), 0.25);
    assert_eq!(prefs.get(name, PRIVATE, "string", String::new()), "text");
    assert_eq!(prefs.get(name, PRIVATE, "set", BTreeSet::new()), tags);
}

#[test]
fn test_empty_key_is_rejected_without_side_effects() {
    let backend = Arc::new(MemoryPrefsBackend::new());
    let prefs = PreferencesManager::new(backend.clone());

    assert!(!prefs.defaults().put("", "x".to_string()));
    assert_eq!(
        prefs.defaults().get("", "fallback".to_string()),
        "fallback"
    );
    assert_eq!(backend.namespace_count(), 0);
}

#[test]
fn test_invalid_mode_and_name_are_rejected() {
    let backend = Arc::new(MemoryPrefsBackend::new());
    let prefs = PreferencesManager::new(backend.clone());

    assert!(!prefs.put("ns", 3, "k", 1_i32));
    assert!(!prefs.put("ns", -1, "k", 1_i32));
    assert!(!prefs.put("", PRIVATE, "k", 1_i32));
    assert!(!prefs.remove("ns", 9, "k"));
    assert_eq!(prefs.get("ns", 9, "k", 5_i32), 5);
    assert!(prefs.get_all("ns", 9).is_none());
    assert!(prefs.get_all("", PRIVATE).is_none());
    assert_eq!(backend.namespace_count(), 0);
}

#[test]
fn test_every_recognized_mode_is_accepted() {
    let prefs = PreferencesManager::in_memory();
    for mode in [
        AccessMode::PRIVATE,
        AccessMode::WORLD_READABLE,
        AccessMode::WORLD_WRITABLE,
    ] {
        assert!(prefs.put("modes", mode, "k", mode));
        assert_eq!(prefs.get("modes", mode, "k", -1_i32), mode);
        assert!(prefs.get_all("modes", mode).is_some());
    }
}

#[test]
fn test_type_mismatch_returns_default() {
    let prefs = PreferencesManager::in_memory();
    assert!(prefs.settings().put("volume", 7_i32));

    assert_eq!(prefs.settings().get("volume", 3_i64), 3);
    assert_eq!(prefs.settings().get("volume", "none".to_string()), "none");
    assert_eq!(prefs.settings().get("volume", 0_i32), 7);
}

#[test]
fn test_get_value_returns_stored_variant() {
    let prefs = PreferencesManager::in_memory();
    assert!(prefs.settings().put("volume", 7_i32));

    assert_eq!(prefs.settings().get_value("volume"), Some(PrefValue::Int(7)));
    assert_eq!(prefs.settings().get_value("missing"), None);
    assert_eq!(prefs.get_value(SETTINGS_NAMESPACE_NAME, 5, "volume"), None);
}

#[test]
fn test_remove_deletes_and_missing_key_succeeds() {
    let prefs = PreferencesManager::in_memory();
    let login = prefs.login();

    assert!(login.put("token", "abc".to_string()));
    assert!(login.remove("token"));
    assert_eq!(login.get("token", String::new()), "");
    assert!(login.remove("never-written"));
}

#[test]
fn test_namespaces_are_isolated() {
    let prefs = PreferencesManager::in_memory();
    assert!(prefs.settings().put("theme", "dark".to_string()));

    assert_eq!(prefs.defaults().get("theme", "none".to_string()), "none");
    assert_eq!(prefs.login().get("theme", "none".to_string()), "none");
    assert_eq!(
        prefs.get(SETTINGS_NAMESPACE_NAME, PRIVATE, "theme", String::new()),
        "dark"
    );
}

#[test]
fn test_get_all_lists_namespace_entries() {
    let prefs = PreferencesManager::in_memory();
    let settings = prefs.namespace(Namespace::Settings);
    assert_eq!(settings.namespace(), Namespace::Settings);

    assert!(settings.put("a", true));
    assert!(settings.put("b", 2_i64));

    let entries = settings.get_all().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["a"], PrefValue::Bool(true));
    assert_eq!(entries["b"], PrefValue::Long(2));
    assert!(prefs.login().get_all().unwrap().is_empty());
}

#[test]
fn test_always_reject_mode_check_blocks_get_all() {
    let prefs =
        PreferencesManager::in_memory().with_get_all_mode_check(GetAllModeCheck::AlwaysReject);
    assert!(prefs.defaults().put("k", 1_i32));

    assert!(prefs.defaults().get_all().is_none());
    assert_eq!(prefs.defaults().get("k", 0_i32), 1);
}

#[test]
fn test_settings_mode_check_reaches_file_backed_manager() {
    let temp_dir = TempDir::new().unwrap();
    let settings = KutilsSettings {
        prefs_dir: temp_dir.path().to_path_buf(),
        get_all_mode_check: GetAllModeCheck::AlwaysReject,
        ..KutilsSettings::default()
    };

    let prefs = PreferencesManager::from_settings(&settings).unwrap();
    assert!(prefs.defaults().put("k", 1_i32));
    assert!(prefs.defaults().get_all().is_none());

    let strict = PreferencesManager::from_settings(&KutilsSettings {
        get_all_mode_check: GetAllModeCheck::Strict,
        ..settings
    })
    .unwrap();
    assert_eq!(strict.defaults().get_all().unwrap().len(), 1);
}

#[test]
fn test_commit_failure_is_reported_as_false() {
    let prefs = PreferencesManager::new(Arc::new(ReadOnlyBackend::default()));

    assert!(!prefs.defaults().put("k", 1_i32));
    assert!(!prefs.defaults().remove("k"));
    assert_eq!(prefs.defaults().get("k", 9_i32), 9);
}

#[test]
fn test_file_backed_manager_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let settings = KutilsSettings {
        prefs_dir: temp_dir.path().join("shared_prefs"),
        ..KutilsSettings::default()
    };

    {
        let prefs = PreferencesManager::from_settings(&settings).unwrap();
        assert!(prefs.login().put("user", "alice".to_string()));
        assert!(prefs.settings().put("ratio", 1.5_f32));
    }

    let prefs = PreferencesManager::from_settings(&settings).unwrap();
    assert_eq!(prefs.login().get("user", String::new()), "alice");
    assert_eq!(prefs.settings().get("ratio", 0.0_f32), 1.5);
    assert!(
        settings
            .prefs_dir
            .join(format!("{}.json", Namespace::Login.store_name()))
            .exists()
    );
}

#[test]
fn test_shared_manager_across_threads() {
    let prefs = Arc::new(PreferencesManager::in_memory());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let prefs = Arc::clone(&prefs);
            std::thread::spawn(move || prefs.defaults().put(&format!("key{i}"), i))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(prefs.defaults().get_all().unwrap().len(), 4);
}
