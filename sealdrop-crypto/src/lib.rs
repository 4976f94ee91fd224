//! Client-side encryption core for Sealdrop.
//!
//! Files are encrypted on the device before they ever reach storage, using:
//! - A fresh random 256-bit key per file (never reused, never stored here)
//! - AES-256-GCM authenticated encryption with a random 96-bit nonce
//! - Standard base64 for carrying the key through text channels
//!
//! # Architecture
//!
//! The artifact that crosses the storage boundary is a self-contained
//! container: `nonce ‖ ciphertext ‖ tag`. The key travels out-of-band as a
//! base64 string attached to share metadata or a response header; the
//! ciphertext and the key are never merged into one artifact at rest or in
//! transit. Whoever holds both can recover the plaintext; access control
//! belongs entirely to the sharing layer above this crate.
//!
//! The core holds no state between calls and performs no I/O of its own
//! apart from reading the system RNG, so concurrent calls need no
//! coordination. Large files go through the bounded-memory chunked mode in
//! [`stream`] instead of the one-shot buffer API.

mod cipher;
mod encoding;
mod encryptor;
mod error;
mod key;
mod stream;

pub use cipher::{MIN_CONTAINER_SIZE, NONCE_SIZE, TAG_SIZE, decrypt, encrypt};
pub use encoding::{decode_key, encode_key};
pub use encryptor::{
    prepare_for_upload, prepare_stream_for_upload, recover_from_download,
    recover_stream_from_download,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{FileKey, KEY_SIZE, generate_key};
pub use stream::{CHUNK_SIZE, decrypt_stream, encrypt_stream};
