//! Text-safe key transport encoding.
//!
//! Keys cross JSON bodies, form fields, and HTTP headers as standard
//! padded base64 with no line breaks. Decoding is strict: anything that
//! does not decode to exactly 32 bytes is rejected, never truncated or
//! padded into looking valid.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{FileKey, KEY_SIZE};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroize;

/// Encodes raw key bytes as a transport-safe base64 string.
pub fn encode_key(key: &FileKey) -> String {
    STANDARD.encode(key.as_bytes())
}

/// Decodes a base64 key string back into a [`FileKey`].
pub fn decode_key(text: &str) -> CryptoResult<FileKey> {
    let mut bytes = STANDARD
        .decode(text)
        .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;

    if bytes.len() != KEY_SIZE {
        let len = bytes.len();
        bytes.zeroize();
        return Err(CryptoError::InvalidKeyEncoding(format!(
            "decoded to {len} bytes, expected {KEY_SIZE}"
        )));
    }

    let key = FileKey::from_slice(&bytes)?;
    bytes.zeroize();
    Ok(key)
}
