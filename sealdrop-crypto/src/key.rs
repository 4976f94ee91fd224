//! Per-file symmetric key generation.

use crate::error::{CryptoError, CryptoResult};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key length in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// A 256-bit key protecting exactly one file.
///
/// Generated fresh for every encryption and handed to the caller as an
/// encoded string immediately; the core never persists it. A key must
/// never be reused across two plaintexts; nonce reuse under the same key
/// is the catastrophic failure mode of GCM. Zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FileKey([u8; KEY_SIZE]);

impl FileKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a key from a slice, rejecting anything that is not exactly
    /// [`KEY_SIZE`] bytes. Keys cross a text-encoding round trip, so the
    /// length is re-checked here rather than trusted.
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let arr: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidKey {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl PartialEq for FileKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for FileKey {}

impl std::fmt::Debug for FileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs
        f.write_str("FileKey(..)")
    }
}

/// Generates a fresh random 256-bit key from the OS CSPRNG.
pub fn generate_key() -> CryptoResult<FileKey> {
    let mut bytes = [0u8; KEY_SIZE];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::EntropySourceUnavailable(e.to_string()))?;
    Ok(FileKey::from_bytes(bytes))
}
