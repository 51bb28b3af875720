//! phrasevault - Password-sealed envelopes for wallet recovery phrases
//!
//! Derives an AES-256 key from a password with PBKDF2-HMAC-SHA256, seals a
//! secret phrase with AES-256-GCM, and frames the result as a single-line,
//! URL-query-style text envelope that can be re-opened later with the same
//! password.

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod password;
pub mod vault;

pub use envelope::Envelope;
pub use error::{Error, Result};
