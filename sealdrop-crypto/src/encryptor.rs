//! Caller-facing entry points.
//!
//! The surrounding upload/download layer only ever needs these four
//! functions; everything else in the crate is implementation detail. Each
//! call generates (or decodes) its own key, and nothing is shared between
//! calls.

use std::io::{Read, Write};

use crate::cipher::{decrypt, encrypt};
use crate::encoding::{decode_key, encode_key};
use crate::error::CryptoResult;
use crate::key::generate_key;
use crate::stream::{decrypt_stream, encrypt_stream};

/// Encrypts `plaintext` under a fresh per-file key.
///
/// Returns the transportable container and the encoded key. The two must
/// travel as distinct values: whoever holds both can recover the
/// plaintext, so keeping them apart is the whole security model.
pub fn prepare_for_upload(plaintext: &[u8]) -> CryptoResult<(Vec<u8>, String)> {
    let key = generate_key()?;
    let container = encrypt(&key, plaintext)?;
    Ok((container, encode_key(&key)))
}

/// Decrypts a downloaded container with its transported key.
///
/// `None` means the file was never client-side encrypted (server-managed
/// or plaintext storage): the body passes through untouched. That is a
/// different outcome from a failed decryption; an empty or corrupt key
/// string is an error, never a passthrough.
pub fn recover_from_download(
    container: &[u8],
    encoded_key: Option<&str>,
) -> CryptoResult<Vec<u8>> {
    match encoded_key {
        None => Ok(container.to_vec()),
        Some(text) => {
            let key = decode_key(text)?;
            decrypt(&key, container)
        }
    }
}

/// Streaming variant of [`prepare_for_upload`] using the chunked format.
///
/// Returns the container size in bytes and the encoded key.
pub fn prepare_stream_for_upload<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> CryptoResult<(u64, String)> {
    let key = generate_key()?;
    let written = encrypt_stream(&key, reader, writer)?;
    Ok((written, encode_key(&key)))
}

/// Streaming variant of [`recover_from_download`] for chunked containers.
///
/// Returns the recovered plaintext size in bytes; with no key the body is
/// copied through unchanged.
pub fn recover_stream_from_download<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    encoded_key: Option<&str>,
) -> CryptoResult<u64> {
    match encoded_key {
        None => Ok(std::io::copy(&mut reader, &mut writer)?),
        Some(text) => {
            let key = decode_key(text)?;
            decrypt_stream(&key, reader, writer)
        }
    }
}
