//! Operational error context propagation with `anyhow`.
//!
//! Store operations collapse failures into sentinel values, so every
//! swallowed error passes through [`ErrorReporter`] to keep it visible in logs.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::{debug, error, warn},
};

/// Turns a domain error into an `anyhow` error labelled with the step that
/// failed, such as `load settings` or `decode base64 input`.
///
/// The CLI prints the labels outermost first through
/// [`ErrorReporter::to_user_message`].
pub trait ResultExt<T, E> {
    /// Labels the error with a fixed step name.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Labels the error with a step name that includes runtime values, such as
    /// the preference directory being opened.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports an expected rejection, such as a validation failure.
    pub fn debug(error: &Error, context: &str) {
        debug!(context = context, error = %error, "Rejected operation");
    }

    /// Reports a recoverable failure that was turned into a sentinel value.
    pub fn warn(error: &Error, context: &str) {
        warn!(context = context, error = %error, "Operation failed");
    }

    /// Reports a failure the caller cannot recover from.
    pub fn error(error: &Error, context: &str) {
        error!(context = context, error = %error, "Operation aborted");
    }

    /// Formats the full context chain on one line, outermost first.
    pub fn to_user_message(error: &Error) -> String {
        error
            .chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }
}
