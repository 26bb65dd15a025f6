//! Stream helpers.

use std::{
    fs::{File, OpenOptions},
    io::Read,
    path::Path,
};

use crate::{
    codec::charset::Charset,
    error::domain::FilesError,
    files::{mutate::create_file, query::exists},
};

/// Opens `path` for writing, truncating existing content.
///
/// When the file is missing it is created (with its parent directories) if
/// `auto_create` is set.
///
/// # Errors
///
/// Returns `FilesError::NotFound` for a missing file without `auto_create`
/// and `FilesError::IoError` if creating or opening fails.
pub fn open_output<P: AsRef<Path>>(path: P, auto_create: bool) -> Result<File, FilesError> {
    let path = path.as_ref();
    if !exists(path) {
        if !auto_create {
            return Err(FilesError::not_found(path.display().to_string()));
        }
        create_file(path)?;
    }
    Ok(OpenOptions::new().write(true).truncate(true).open(path)?)
}

/// Reads everything from `reader` and decodes it in `charset`.
///
/// # Errors
///
/// Returns `FilesError::IoError` if reading fails.
pub fn read_to_string<R: Read>(mut reader: R, charset: Charset) -> Result<String, FilesError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(charset.decode(&buffer))
}
