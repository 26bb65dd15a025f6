//! Hex formatting and MD5 digests.

use md5::{Digest, Md5};

/// Formats bytes as lowercase hex, two digits per byte.
#[must_use]
pub fn bytes_to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// MD5 digest of the UTF-8 bytes of `raw`, as lowercase hex.
#[must_use]
pub fn md5_hex(raw: &str) -> String {
    md5_hex_bytes(raw.as_bytes())
}

/// MD5 digest of `data`, as lowercase hex.
#[must_use]
pub fn md5_hex_bytes(data: &[u8]) -> String {
    bytes_to_hex(&Md5::digest(data))
}
