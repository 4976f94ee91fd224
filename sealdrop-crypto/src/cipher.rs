//! One-shot AES-256-GCM over whole-file buffers.
//!
//! Container layout: `nonce (12) ‖ ciphertext ‖ tag (16)`. The nonce is
//! generated inside [`encrypt`] for every call; callers never supply one,
//! which removes the entire class of nonce-reuse bugs from their side of
//! the boundary.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{CryptoError, CryptoResult};
use crate::key::{FileKey, KEY_SIZE};

/// GCM nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// Smallest valid container: a nonce plus the tag over an empty plaintext.
pub const MIN_CONTAINER_SIZE: usize = NONCE_SIZE + TAG_SIZE;

pub(crate) fn build_cipher(key: &FileKey) -> CryptoResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::InvalidKey {
        expected: KEY_SIZE,
        actual: key.as_bytes().len(),
    })
}

pub(crate) fn random_nonce() -> CryptoResult<[u8; NONCE_SIZE]> {
    let mut bytes = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::EntropySourceUnavailable(e.to_string()))?;
    Ok(bytes)
}

/// Encrypts `plaintext` under `key` with a freshly generated nonce.
///
/// Returns the transportable container: `nonce ‖ ciphertext ‖ tag`.
pub fn encrypt(key: &FileKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = build_cipher(key)?;
    let nonce_bytes = random_nonce()?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut container = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    container.extend_from_slice(&nonce_bytes);
    container.extend_from_slice(&ciphertext);
    Ok(container)
}

/// Decrypts a container, returning the exact original plaintext.
///
/// All-or-nothing: no partial plaintext is ever returned. Containers
/// shorter than [`MIN_CONTAINER_SIZE`] are rejected before any AEAD work.
pub fn decrypt(key: &FileKey, container: &[u8]) -> CryptoResult<Vec<u8>> {
    if container.len() < MIN_CONTAINER_SIZE {
        return Err(CryptoError::MalformedContainer {
            len: container.len(),
        });
    }

    let (nonce_bytes, ciphertext) = container.split_at(NONCE_SIZE);
    let cipher = build_cipher(key)?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
