//! Read-only file system queries.
//!
//! Queries never fail: missing or unreadable paths simply answer `false`,
//! `None` or zero.

use std::{
    fs::{metadata, read_dir, symlink_metadata},
    path::Path,
};

use tracing::debug;

/// Whether `path` names an existing file or directory.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    !path.as_os_str().is_empty() && path.exists()
}

/// Whether `path` exists and is a regular file.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    exists(&path) && path.as_ref().is_file()
}

/// Whether `path` exists and is a directory.
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    exists(&path) && path.as_ref().is_dir()
}

/// Whether `path` exists and its name starts with a dot.
pub fn is_hidden<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    exists(path)
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Names of the entries directly inside `dir`, sorted.
///
/// # Returns
///
/// `None` when `dir` is not a readable directory.
pub fn list_names<P: AsRef<Path>>(dir: P) -> Option<Vec<String>> {
    if !is_directory(&dir) {
        return None;
    }
    let entries = read_dir(dir.as_ref()).ok()?;
    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Some(names)
}

/// Whether `dir` is an existing directory without entries.
pub fn is_empty_directory<P: AsRef<Path>>(dir: P) -> bool {
    list_names(dir).is_some_and(|names| names.is_empty())
}

/// Size of a regular file in bytes, or 0 for anything else.
pub fn file_size<P: AsRef<Path>>(path: P) -> u64 {
    if !is_file(&path) {
        return 0;
    }
    metadata(path.as_ref()).map(|meta| meta.len()).unwrap_or(0)
}

/// Total size in bytes of a file, or of every file below a directory.
///
/// Symbolic links inside a directory are not followed.
pub fn size<P: AsRef<Path>>(path: P) -> u64 {
    let path = path.as_ref();
    if is_directory(path) {
        directory_size(path)
    } else {
        file_size(path)
    }
}

fn directory_size(dir: &Path) -> u64 {
    let Ok(entries) = read_dir(dir) else {
        debug!("Skipping unreadable directory: {:?}", dir);
        return 0;
    };

    let mut total = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(meta) = symlink_metadata(&path) else {
            continue;
        };
        if meta.is_dir() {
            total += directory_size(&path);
        } else if meta.is_file() {
            total += meta.len();
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::TempDir;

    use crate::files::query::{
        exists, file_size, is_directory, is_empty_directory, is_file, is_hidden, list_names,
        size,
    };

    #[test]
    fn test_kind_queries() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        write(&file, "abc").unwrap();

        assert!(exists(&file));
        assert!(is_file(&file));
        assert!(!is_directory(&file));
        assert!(is_directory(temp_dir.path()));
        assert!(!exists(""));
        assert!(!is_file(temp_dir.path().join("missing")));
    }

    #[test]
    fn test_hidden_by_leading_dot() {
        let temp_dir = TempDir::new().unwrap();
        let hidden = temp_dir.path().join(".secret");
        write(&hidden, "").unwrap();

        assert!(is_hidden(&hidden));
        assert!(!is_hidden(temp_dir.path().join(".missing")));
    }

    #[test]
    fn test_listing_and_emptiness() {
        let temp_dir = TempDir::new().unwrap();
        assert!(is_empty_directory(temp_dir.path()));

        write(temp_dir.path().join("b"), "").unwrap();
        create_dir_all(temp_dir.path().join("a")).unwrap();

        assert_eq!(
            list_names(temp_dir.path()).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(!is_empty_directory(temp_dir.path()));
        assert!(!is_empty_directory(temp_dir.path().join("b")));
        assert!(list_names(temp_dir.path().join("b")).is_none());
    }

    #[test]
    fn test_recursive_size() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("x").join("y");
        create_dir_all(&nested).unwrap();
        write(temp_dir.path().join("top"), vec![0u8; 10]).unwrap();
        write(nested.join("deep"), vec![0u8; 32]).unwrap();

        assert_eq!(file_size(temp_dir.path().join("top")), 10);
        assert_eq!(file_size(temp_dir.path()), 0);
        assert_eq!(size(temp_dir.path()), 42);
        assert_eq!(size(&nested), 32);
        assert_eq!(size(temp_dir.path().join("missing")), 0);
    }
}
