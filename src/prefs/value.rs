//! Stored preference values and their typed accessors.

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
    StringSet(BTreeSet<String>),
}

impl PrefValue {
    /// Short name of the stored type, used in logs and the CLI.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::StringSet(_) => "string_set",
        }
    }

    /// Parses a command-line style `(kind, text)` pair into a value.
    ///
    /// String sets are given as comma separated items.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the kind is unknown or the
    /// text does not parse as that kind.
    pub fn parse(kind: &str, text: &str) -> Result<Self, String> {
        let value = match kind {
            "bool" => Self::Bool(text.parse().map_err(|e| format!("{e}"))?),
            "int" => Self::Int(text.parse().map_err(|e| format!("{e}"))?),
            "long" => Self::Long(text.parse().map_err(|e| format!("{e}"))?),
            "float" => Self::Float(text.parse().map_err(|e| format!("{e}"))?),
            "string" => Self::String(text.to_string()),
            "string_set" => Self::StringSet(
                text.split(',')
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            other => return Err(format!("unknown value type: {other}")),
        };
        Ok(value)
    }
}

impl Display for PrefValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::StringSet(values) => {
                let joined = values.iter().cloned().collect::<Vec<_>>().join(",");
                write!(f, "[{joined}]")
            }
        }
    }
}

/// Rust types that can be stored as a [`PrefValue`].
pub trait PrefType: Sized {
    /// Wraps the value for storage.
    fn into_pref(self) -> PrefValue;

    /// Unwraps a stored value, or `None` when it holds a different type.
    fn from_pref(value: PrefValue) -> Option<Self>;
}

macro_rules! impl_pref_type {
    ($ty:ty, $variant:ident) => {
        impl PrefType for $ty {
            fn into_pref(self) -> PrefValue {
                PrefValue::$variant(self)
            }

            fn from_pref(value: PrefValue) -> Option<Self> {
                match value {
                    PrefValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_pref_type!(bool, Bool);
impl_pref_type!(i32, Int);
impl_pref_type!(i64, Long);
impl_pref_type!(f32, Float);
impl_pref_type!(String, String);
impl_pref_type!(BTreeSet<String>, StringSet);

impl PrefType for PrefValue {
    fn into_pref(self) -> PrefValue {
        self
    }

    fn from_pref(value: PrefValue) -> Option<Self> {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::{from_str, to_string};

    use crate::prefs::value::{PrefType, PrefValue};

    #[test]
    fn test_typed_unwrap_rejects_other_variants() {
        assert_eq!(i32::from_pref(PrefValue::Int(4)), Some(4));
        assert_eq!(i64::from_pref(PrefValue::Int(4)), None);
        assert_eq!(bool::from_pref(PrefValue::String("true".into())), None);
    }

    #[test]
    fn test_serialized_form_is_tagged() {
        let json = to_string(&PrefValue::Long(42)).unwrap();
        assert_eq!(json, r#"{"type":"long","value":42}"#);

        let set: BTreeSet<String> = ["a", "b"].into_iter().map(String::from).collect();
        let parsed: PrefValue =
            from_str(r#"{"type":"string_set","value":["b","a"]}"#).unwrap();
        assert_eq!(parsed, PrefValue::StringSet(set));
    }

    #[test]
    fn test_parse_from_text() {
        assert_eq!(PrefValue::parse("bool", "true").unwrap(), PrefValue::Bool(true));
        assert_eq!(PrefValue::parse("int", "-3").unwrap(), PrefValue::Int(-3));
        assert_eq!(
            PrefValue::parse("string_set", "x,y,,x").unwrap().to_string(),
            "[x,y]"
        );
        assert!(PrefValue::parse("int", "abc").is_err());
        assert!(PrefValue::parse("blob", "1").is_err());
    }
}
