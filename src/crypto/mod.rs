//! Cryptography module for phrasevault
//!
//! Provides AES-256-GCM encryption with PBKDF2-HMAC-SHA256 key derivation.
//! The derived key exists only for the duration of one seal or open call.

mod encryption;
mod kdf;

pub use encryption::{decrypt, encrypt, SealedBox};
pub use kdf::{derive_key, DerivedKey};

/// Size of AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;

/// Size of GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Size of generated salt for key derivation
pub const SALT_SIZE: usize = 16;
