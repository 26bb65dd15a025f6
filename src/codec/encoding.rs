//! Base64 and URL form encoding.

use {
    base64::{Engine, engine::general_purpose::STANDARD},
    percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode},
};

use crate::{codec::charset::Charset, error::domain::CodecError};

/// Bytes escaped by form encoding: everything except alphanumerics,
/// `.`, `-`, `*`, `_` and the space, which becomes `+`.
const FORM_ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_')
    .remove(b' ');

/// Encodes bytes as padded standard Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes padded standard Base64, ignoring ASCII whitespace such as line
/// breaks.
///
/// # Errors
///
/// Returns `CodecError::Base64Error` for malformed input.
pub fn decode_base64(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let compact: Vec<u8> = data
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}

/// Encodes `raw` as `application/x-www-form-urlencoded` text.
#[must_use]
pub fn encode_url(raw: &str, charset: Charset) -> String {
    percent_encode(&charset.encode(raw), FORM_ESCAPED)
        .to_string()
        .replace(' ', "+")
}

/// Decodes `application/x-www-form-urlencoded` text.
///
/// Runs of percent escapes are decoded together in `charset`; other
/// characters are kept as they are, except `+` which becomes a space.
///
/// # Errors
///
/// Returns `CodecError::MalformedEscape` when a `%` is not followed by two
/// hex digits.
pub fn decode_url(encoded: &str, charset: Charset) -> Result<String, CodecError> {
    let bytes = encoded.as_bytes();
    let mut decoded = String::with_capacity(encoded.len());
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'+' => {
                decoded.push(' ');
                pos += 1;
            }
            b'%' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos] == b'%' {
                    let valid = pos + 2 < bytes.len()
                        && bytes[pos + 1].is_ascii_hexdigit()
                        && bytes[pos + 2].is_ascii_hexdigit();
                    if !valid {
                        return Err(CodecError::MalformedEscape { position: pos });
                    }
                    pos += 3;
                }
                let run: Vec<u8> = percent_decode_str(&encoded[start..pos]).collect();
                decoded.push_str(&charset.decode(&run));
            }
            _ => {
                let Some(ch) = encoded[pos..].chars().next() else {
                    break;
                };
                decoded.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    Ok(decoded)
}
