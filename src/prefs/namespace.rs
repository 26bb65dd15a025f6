//! The fixed preference namespaces.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prefs::mode::AccessMode;

/// Backend name of the default namespace.
pub const DEFAULT_NAMESPACE_NAME: &str = "default_sharepreferences";
/// Backend name of the settings namespace.
pub const SETTINGS_NAMESPACE_NAME: &str = "settings";
/// Backend name of the login namespace.
pub const LOGIN_NAMESPACE_NAME: &str = "loginmessage";

/// One of the three built-in namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// General-purpose values.
    Default,
    /// Application settings.
    Settings,
    /// Login details of the current user.
    Login,
}

impl Namespace {
    /// All namespaces in declaration order.
    pub const ALL: [Namespace; 3] = [Self::Default, Self::Settings, Self::Login];

    /// Name of the backing store.
    #[must_use]
    pub fn store_name(self) -> &'static str {
        match self {
            Self::Default => DEFAULT_NAMESPACE_NAME,
            Self::Settings => SETTINGS_NAMESPACE_NAME,
            Self::Login => LOGIN_NAMESPACE_NAME,
        }
    }

    /// Access mode the namespace is opened with.
    #[must_use]
    pub fn mode(self) -> AccessMode {
        AccessMode::Private
    }
}

impl FromStr for Namespace {
    type Err = String;

    /// Accepts the short names (`default`, `settings`, `login`) as well as
    /// the backing store names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | DEFAULT_NAMESPACE_NAME => Ok(Self::Default),
            "settings" => Ok(Self::Settings),
            "login" | LOGIN_NAMESPACE_NAME => Ok(Self::Login),
            other => Err(format!("unknown namespace: {other}")),
        }
    }
}
