//! Upload/download boundary for Sealdrop.
//!
//! Everything with security depth lives in `sealdrop-crypto`; this crate
//! is the thin caller around it:
//! - HTTP client for the file storage API (upload, download, share, list)
//! - Transfer orchestration that encrypts before upload and decrypts
//!   after download, keeping container and key as two distinct values
//!   end to end
//!
//! A file the server never got a client key for comes back without one,
//! and its body passes through untouched; that state is deliberately
//! separate from a failed decryption.

pub mod api_client;
pub mod config;
pub mod error;
pub mod transfer;
pub mod types;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transfer::FileTransfer;
pub use types::*;
