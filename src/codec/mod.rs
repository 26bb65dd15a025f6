//! Byte, text and digest conversions.

pub mod charset;
pub mod digest;
pub mod encoding;

pub use {
    charset::{Charset, bytes_to_string, string_to_bytes, string_to_bytes_named},
    digest::{bytes_to_hex, md5_hex, md5_hex_bytes},
    encoding::{decode_base64, decode_url, encode_base64, encode_url},
};
