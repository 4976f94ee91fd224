//! Chunked AES-256-GCM for large files.
//!
//! Streams plaintext through the cipher in bounded-size chunks so peak
//! memory stays independent of file size. Layout:
//!
//! ```text
//! base_nonce (12) ‖ record_0 ‖ record_1 ‖ … ‖ record_n
//! ```
//!
//! Each record is the AES-256-GCM `ciphertext ‖ tag` of one plaintext
//! chunk of [`CHUNK_SIZE`] bytes (the final record covers whatever
//! remains, possibly zero bytes). Chunk `i` is sealed with the base nonce
//! XORed with the big-endian chunk index in bytes 4..12, and with
//! `index (8 bytes BE) ‖ final_flag (1 byte)` as associated data. The
//! index binding rejects record reordering; the final flag rejects
//! truncation or extension of the record sequence. Any such manipulation
//! surfaces as [`CryptoError::AuthenticationFailed`], indistinguishable
//! from a wrong key.
//!
//! The chunked format is not interchangeable with the one-shot container
//! in [`crate::cipher`]; which of the two produced a blob must travel in
//! caller metadata.

use std::io::{ErrorKind, Read, Write};

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::Nonce;

use crate::cipher::{NONCE_SIZE, TAG_SIZE, build_cipher, random_nonce};
use crate::error::{CryptoError, CryptoResult};
use crate::key::FileKey;

/// Plaintext bytes sealed per record.
pub const CHUNK_SIZE: usize = 1024 * 1024;

fn chunk_nonce(base: &[u8; NONCE_SIZE], index: u64) -> [u8; NONCE_SIZE] {
    let mut nonce = *base;
    for (i, b) in index.to_be_bytes().iter().enumerate() {
        nonce[4 + i] ^= b;
    }
    nonce
}

fn chunk_aad(index: u64, is_final: bool) -> [u8; 9] {
    let mut aad = [0u8; 9];
    aad[..8].copy_from_slice(&index.to_be_bytes());
    aad[8] = is_final as u8;
    aad
}

/// Reads up to `max` bytes, retrying on interruption. Returns fewer bytes
/// only at end of input.
fn read_up_to<R: Read>(reader: &mut R, max: usize) -> CryptoResult<Vec<u8>> {
    let mut buf = vec![0u8; max];
    let mut filled = 0;
    while filled < max {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

/// Encrypts `reader` into `writer` as a chunked container.
///
/// Returns the total container size in bytes. Empty input still produces
/// one (empty) final record, so the container is never shorter than the
/// one-shot minimum.
pub fn encrypt_stream<R: Read, W: Write>(
    key: &FileKey,
    mut reader: R,
    mut writer: W,
) -> CryptoResult<u64> {
    let cipher = build_cipher(key)?;
    let base = random_nonce()?;

    writer.write_all(&base)?;
    let mut written = NONCE_SIZE as u64;

    let mut index: u64 = 0;
    let mut current = read_up_to(&mut reader, CHUNK_SIZE)?;
    loop {
        // One chunk of read-ahead decides whether this record is final.
        let next = read_up_to(&mut reader, CHUNK_SIZE)?;
        let is_final = next.is_empty();

        let nonce = chunk_nonce(&base, index);
        let record = cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &current,
                    aad: &chunk_aad(index, is_final),
                },
            )
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        writer.write_all(&record)?;
        written += record.len() as u64;

        if is_final {
            break;
        }
        current = next;
        index += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// Decrypts a chunked container from `reader` into `writer`.
///
/// Returns the recovered plaintext size in bytes. Fails closed: nothing
/// already written to `writer` is trustworthy if an error is returned.
pub fn decrypt_stream<R: Read, W: Write>(
    key: &FileKey,
    mut reader: R,
    mut writer: W,
) -> CryptoResult<u64> {
    let cipher = build_cipher(key)?;

    let base_buf = read_up_to(&mut reader, NONCE_SIZE)?;
    let mut current = read_up_to(&mut reader, CHUNK_SIZE + TAG_SIZE)?;
    if base_buf.len() < NONCE_SIZE || current.len() < TAG_SIZE {
        return Err(CryptoError::MalformedContainer {
            len: base_buf.len() + current.len(),
        });
    }
    let mut base = [0u8; NONCE_SIZE];
    base.copy_from_slice(&base_buf);

    let mut index: u64 = 0;
    let mut produced: u64 = 0;
    loop {
        let next = read_up_to(&mut reader, CHUNK_SIZE + TAG_SIZE)?;
        let is_final = next.is_empty();

        let nonce = chunk_nonce(&base, index);
        let chunk = cipher
            .decrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &current,
                    aad: &chunk_aad(index, is_final),
                },
            )
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        writer.write_all(&chunk)?;
        produced += chunk.len() as u64;

        if is_final {
            break;
        }
        if next.len() < TAG_SIZE {
            // A trailing fragment shorter than a tag can only come from
            // truncation or injected bytes.
            return Err(CryptoError::AuthenticationFailed);
        }
        current = next;
        index += 1;
    }

    writer.flush()?;
    Ok(produced)
}
