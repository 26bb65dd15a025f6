//! JSON-file preference backend.
//!
//! Each namespace lives in `<root>/<name>.json`. Files are loaded lazily on
//! first access, kept in memory afterwards, and rewritten in full on every
//! commit: the contents go to a staging file created with the namespace's
//! permissions, are synced to disk, and the staging file is renamed over the
//! namespace file.

use std::{
    collections::HashMap,
    fs::{File, OpenOptions, create_dir_all, read_to_string, remove_file, rename},
    io::Write,
    path::{Path, PathBuf},
};

use {
    parking_lot::RwLock,
    serde_json::{from_str, to_string_pretty},
    tracing::{debug, warn},
};

use crate::{
    error::domain::PrefsError,
    prefs::{
        backend::{PrefEdit, PrefMap, PrefsBackend, apply_edits},
        mode::AccessMode,
        value::PrefValue,
    },
};

/// Backend persisting each namespace as a JSON object on disk.
#[derive(Debug)]
pub struct JsonFilePrefsBackend {
    /// Directory holding the namespace files.
    root: PathBuf,
    /// Namespaces already read from disk.
    loaded: RwLock<HashMap<String, PrefMap>>,
}

impl JsonFilePrefsBackend {
    /// Opens a backend rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::IoError` if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let root = root.into();
        create_dir_all(&root)?;
        debug!("Opened preference directory: {:?}", root);
        Ok(Self {
            root,
            loaded: RwLock::new(HashMap::new()),
        })
    }

    /// Path of the file backing a namespace.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::InvalidName` when the name would escape the root.
    pub fn namespace_path(&self, name: &str) -> Result<PathBuf, PrefsError> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
        {
            return Err(PrefsError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(format!("{name}.json")))
    }

    /// Runs `f` against the namespace map, loading it from disk on first use.
    fn with_map<R>(&self, name: &str, f: impl FnOnce(&PrefMap) -> R) -> Result<R, PrefsError> {
        if let Some(map) = self.loaded.read().get(name) {
            return Ok(f(map));
        }

        let mut loaded = self.loaded.write();
        if !loaded.contains_key(name) {
            let map = load_map(&self.namespace_path(name)?)?;
            loaded.insert(name.to_string(), map);
        }
        Ok(f(&loaded[name]))
    }
}

impl PrefsBackend for JsonFilePrefsBackend {
    fn get(
        &self,
        name: &str,
        _mode: AccessMode,
        key: &str,
    ) -> Result<Option<PrefValue>, PrefsError> {
        self.with_map(name, |map| map.get(key).cloned())
    }

    fn get_all(&self, name: &str, _mode: AccessMode) -> Result<PrefMap, PrefsError> {
        self.with_map(name, Clone::clone)
    }

    fn commit(&self, name: &str, mode: AccessMode, edits: &[PrefEdit]) -> Result<(), PrefsError> {
        for edit in edits {
            if let PrefEdit::Put {
                key,
                value: PrefValue::Float(value),
            } = edit
                && !value.is_finite()
            {
                return Err(PrefsError::UnrepresentableValue {
                    key: key.clone(),
                    reason: format!("{value} has no JSON form"),
                });
            }
        }

        let path = self.namespace_path(name)?;
        let mut loaded = self.loaded.write();
        let mut map = match loaded.get(name) {
            Some(map) => map.clone(),
            None => load_map(&path)?,
        };
        apply_edits(&mut map, edits);
        save_map(&path, &map, mode)?;
        loaded.insert(name.to_string(), map);
        Ok(())
    }
}

fn load_map(path: &Path) -> Result<PrefMap, PrefsError> {
    if !path.exists() {
        return Ok(PrefMap::new());
    }
    debug!("Loading preferences from file: {:?}", path);
    let contents = read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(PrefMap::new());
    }
    Ok(from_str(&contents)?)
}

fn save_map(path: &Path, map: &PrefMap, mode: AccessMode) -> Result<(), PrefsError> {
    debug!("Saving preferences to file: {:?} ({})", path, mode);
    let contents = to_string_pretty(map)?;
    let staging = path.with_extension("json.tmp");

    let result = write_staging(&staging, contents.as_bytes(), mode)
        .and_then(|()| rename(&staging, path).map_err(PrefsError::from));
    if result.is_err()
        && staging.exists()
        && let Err(error) = remove_file(&staging)
    {
        warn!(error = %error, "Failed to remove staging file: {:?}", staging);
    }
    result
}

/// Writes `contents` to `staging` and flushes it to disk.
///
/// Permissions are narrowed before any data is written, including when a
/// staging file from an interrupted commit is reused.
fn write_staging(staging: &Path, contents: &[u8], mode: AccessMode) -> Result<(), PrefsError> {
    let mut file = staging_options(mode).open(staging)?;
    apply_permissions(&file, mode)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn staging_options(mode: AccessMode) -> OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode.file_permissions());
    options
}

#[cfg(not(unix))]
fn staging_options(_mode: AccessMode) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    options
}

/// Sets the exact permission bits, which the umask may have reduced at creation.
#[cfg(unix)]
fn apply_permissions(file: &File, mode: AccessMode) -> Result<(), PrefsError> {
    use std::{fs::Permissions, os::unix::fs::PermissionsExt};

    file.set_permissions(Permissions::from_mode(mode.file_permissions()))?;
    Ok(())
}

#[cfg(not(unix))]
fn apply_permissions(_file: &File, _mode: AccessMode) -> Result<(), PrefsError> {
    Ok(())
}
