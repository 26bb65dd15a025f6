//! Creating, clearing and deleting files and directories.

use std::{
    fs::{OpenOptions, create_dir_all, read_dir, remove_dir, remove_dir_all, remove_file},
    path::Path,
};

use tracing::debug;

use crate::{
    error::domain::FilesError,
    files::query::{exists, is_directory, is_file},
};

/// Deletes a file, or a directory with everything below it.
///
/// Missing paths are left alone.
///
/// # Errors
///
/// Returns `FilesError::IoError` if removal fails.
pub fn delete<P: AsRef<Path>>(path: P) -> Result<(), FilesError> {
    let path = path.as_ref();
    if is_directory(path) {
        debug!("Deleting directory tree: {:?}", path);
        remove_dir_all(path)?;
    } else if exists(path) {
        debug!("Deleting file: {:?}", path);
        remove_file(path)?;
    }
    Ok(())
}

/// Deletes a single file or an empty directory.
///
/// # Errors
///
/// Returns `FilesError::NotFound` for missing paths and
/// `FilesError::IoError` if removal fails, including for non-empty
/// directories.
pub fn delete_file<P: AsRef<Path>>(path: P) -> Result<(), FilesError> {
    let path = path.as_ref();
    if is_directory(path) {
        remove_dir(path)?;
    } else if exists(path) {
        remove_file(path)?;
    } else {
        return Err(FilesError::not_found(path.display().to_string()));
    }
    Ok(())
}

/// Empties a file, or deletes every entry inside a directory.
///
/// Missing paths are left alone.
///
/// # Errors
///
/// Returns `FilesError::IoError` if an entry cannot be removed.
pub fn clear<P: AsRef<Path>>(path: P) -> Result<(), FilesError> {
    let path = path.as_ref();
    if is_directory(path) {
        for entry in read_dir(path)? {
            delete(entry?.path())?;
        }
        Ok(())
    } else if is_file(path) {
        clear_file(path)
    } else {
        Ok(())
    }
}

/// Truncates an existing file to zero length.
///
/// # Errors
///
/// Returns `FilesError::NotFound` for missing paths,
/// `FilesError::WrongKind` for directories and `FilesError::IoError` if the
/// file cannot be opened.
pub fn clear_file<P: AsRef<Path>>(path: P) -> Result<(), FilesError> {
    let path = path.as_ref();
    if !exists(path) {
        return Err(FilesError::not_found(path.display().to_string()));
    }
    if !is_file(path) {
        return Err(FilesError::WrongKind {
            path: path.display().to_string(),
            expected: "file",
        });
    }
    OpenOptions::new().write(true).truncate(true).open(path)?;
    Ok(())
}

/// Creates a new empty file, creating missing parent directories first.
///
/// # Errors
///
/// Returns `FilesError::IoError` if the file already exists or cannot be
/// created.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<(), FilesError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    OpenOptions::new().write(true).create_new(true).open(path)?;
    Ok(())
}

/// Creates a directory and any missing parents.
///
/// # Returns
///
/// `true` if the directory was created, `false` if it already existed.
///
/// # Errors
///
/// Returns `FilesError::WrongKind` when a file is in the way and
/// `FilesError::IoError` if creation fails.
pub fn create_directory<P: AsRef<Path>>(path: P) -> Result<bool, FilesError> {
    let path = path.as_ref();
    if is_directory(path) {
        return Ok(false);
    }
    if exists(path) {
        return Err(FilesError::WrongKind {
            path: path.display().to_string(),
            expected: "directory",
        });
    }
    create_dir_all(path)?;
    Ok(true)
}
