//! Access modes for preference namespaces.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::domain::PrefsError;

/// Visibility of a namespace file to other processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Readable and writable by the owning user only.
    #[default]
    Private,
    /// Readable by everyone, writable by the owner.
    WorldReadable,
    /// Readable and writable by everyone.
    WorldWritable,
}

impl AccessMode {
    /// Raw value of [`AccessMode::Private`].
    pub const PRIVATE: i32 = 0;
    /// Raw value of [`AccessMode::WorldReadable`].
    pub const WORLD_READABLE: i32 = 1;
    /// Raw value of [`AccessMode::WorldWritable`].
    pub const WORLD_WRITABLE: i32 = 2;

    /// Returns the raw integer value for this mode.
    #[must_use]
    pub fn raw(self) -> i32 {
        match self {
            Self::Private => Self::PRIVATE,
            Self::WorldReadable => Self::WORLD_READABLE,
            Self::WorldWritable => Self::WORLD_WRITABLE,
        }
    }

    /// Unix permission bits applied to namespace files.
    #[must_use]
    pub fn file_permissions(self) -> u32 {
        match self {
            Self::Private => 0o600,
            Self::WorldReadable => 0o644,
            Self::WorldWritable => 0o666,
        }
    }
}

impl TryFrom<i32> for AccessMode {
    type Error = PrefsError;

    fn try_from(mode: i32) -> Result<Self, Self::Error> {
        match mode {
            Self::PRIVATE => Ok(Self::Private),
            Self::WORLD_READABLE => Ok(Self::WorldReadable),
            Self::WORLD_WRITABLE => Ok(Self::WorldWritable),
            _ => Err(PrefsError::InvalidMode { mode }),
        }
    }
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Private => "private",
            Self::WorldReadable => "world-readable",
            Self::WorldWritable => "world-writable",
        };
        f.write_str(name)
    }
}
