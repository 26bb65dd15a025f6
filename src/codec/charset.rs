//! Conversion between text and bytes in a handful of charsets.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::domain::CodecError;

/// Byte emitted for characters the target charset cannot represent.
const REPLACEMENT_BYTE: u8 = b'?';

/// Supported character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Iso8859_1,
    UsAscii,
}

impl Charset {
    /// Looks up a charset by name, ignoring case, `-` and `_`.
    ///
    /// # Returns
    ///
    /// `None` when the name is not recognized.
    #[must_use]
    pub fn for_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Some(Self::Utf8),
            "iso88591" | "latin1" | "l1" => Some(Self::Iso8859_1),
            "usascii" | "ascii" => Some(Self::UsAscii),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "US-ASCII",
        }
    }

    /// Encodes `text`; characters outside the charset become `?`.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Iso8859_1 => encode_single_byte(text, 0xFF),
            Self::UsAscii => encode_single_byte(text, 0x7F),
        }
    }

    /// Decodes `data`; invalid sequences become U+FFFD.
    #[must_use]
    pub fn decode(self, data: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(data).into_owned(),
            Self::Iso8859_1 => data.iter().map(|&b| char::from(b)).collect(),
            Self::UsAscii => data
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
        }
    }
}

impl Display for Charset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

fn encode_single_byte(text: &str, max: u32) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).ok().filter(|&b| u32::from(b) <= max))
        .map(|b| b.unwrap_or(REPLACEMENT_BYTE))
        .collect()
}

/// Decodes bytes as text in the given charset.
#[must_use]
pub fn bytes_to_string(data: &[u8], charset: Charset) -> String {
    charset.decode(data)
}

/// Encodes text as bytes in the given charset.
#[must_use]
pub fn string_to_bytes(text: &str, charset: Charset) -> Vec<u8> {
    charset.encode(text)
}

/// Encodes text as bytes in the charset called `charset_name`.
///
/// # Errors
///
/// Returns `CodecError::UnsupportedCharset` for unknown names.
pub fn string_to_bytes_named(text: &str, charset_name: &str) -> Result<Vec<u8>, CodecError> {
    let charset = Charset::for_name(charset_name).ok_or_else(|| CodecError::UnsupportedCharset {
        name: charset_name.to_string(),
    })?;
    Ok(charset.encode(text))
}
