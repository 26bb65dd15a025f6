//! Error handling built on `thiserror` and `anyhow`.
//!
//! Domain enums give precise failures for each module, while the operational
//! helpers attach context and route swallowed errors to the log.

pub mod domain;
pub mod operational;

pub use {
    domain::{CodecError, FilesError, PrefsError, TimeError},
    operational::{ErrorReporter, ResultExt},
};
