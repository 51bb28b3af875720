//! Error types for phrasevault

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for phrasevault
#[derive(Error, Debug)]
pub enum Error {
    // Crypto errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Tag verification failed. Wrong password, corruption, and tampering are
    /// deliberately indistinguishable.
    #[error("Authentication failed: wrong password or corrupted envelope")]
    Authentication,

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    // Envelope decode errors
    #[error("Envelope decode error: {0}")]
    Decode(String),

    #[error("Unsupported envelope version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid tag length: expected {expected}, got {got}")]
    InvalidTagLength { expected: usize, got: usize },

    #[error("Invalid nonce length: expected {expected}, got {got}")]
    InvalidNonceLength { expected: usize, got: usize },

    // CLI / parameter errors
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Password error: {0}")]
    Password(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
