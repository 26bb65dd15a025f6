//! Domain-specific error types using `thiserror`.
//!
//! This module defines the error enums for the different domains of the
//! crate: preference storage, codecs, file management and time handling.

use std::io::Error as StdError;

use {serde_json::Error as SerdeJsonError, thiserror::Error};

/// Preference store errors.
///
/// The public store API never returns these; they are logged and collapsed
/// into `false`, `None` or the caller's default value.
#[derive(Error, Debug)]
pub enum PrefsError {
    /// The namespace name was empty.
    #[error("Namespace name must not be empty")]
    EmptyName,
    /// The namespace name cannot be used as a file name.
    #[error("Invalid namespace name: {name}")]
    InvalidName { name: String },
    /// The raw access mode is not one of the recognized values.
    #[error("Invalid access mode: {mode}")]
    InvalidMode { mode: i32 },
    /// The key was empty.
    #[error("Preference key must not be empty")]
    EmptyKey,
    /// Reading or writing a namespace file failed.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// A namespace file could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// The value cannot be represented by the backend.
    #[error("Unrepresentable value for key {key}: {reason}")]
    UnrepresentableValue { key: String, reason: String },
    /// `get_all` is configured to reject every access mode.
    #[error("Bulk reads are disabled for namespace {name}")]
    BulkReadRejected { name: String },
}

/// Encoding and decoding errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The charset name is not supported.
    #[error("Unsupported charset: {name}")]
    UnsupportedCharset { name: String },
    /// Base64 input was malformed.
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),
    /// A percent escape was truncated or not hexadecimal.
    #[error("Malformed percent escape at byte {position}")]
    MalformedEscape { position: usize },
}

/// File management errors.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Underlying IO failure.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// The path does not exist and was not created.
    #[error("Path not found: {path}")]
    NotFound { path: String },
    /// The path exists but has the wrong kind.
    #[error("Not a {expected}: {path}")]
    WrongKind { path: String, expected: &'static str },
}

impl FilesError {
    /// Creates a new `NotFound` error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

/// Time conversion errors.
#[derive(Error, Debug)]
pub enum TimeError {
    /// The timestamp is outside the range chrono can represent.
    #[error("Timestamp out of range: {timestamp_ms}")]
    OutOfRange { timestamp_ms: i64 },
}
