//! Sealing and opening envelopes
//!
//! Ties key derivation, encryption, and the envelope together. Seal and
//! open are the only two operations; each runs to completion in one linear
//! pass with no shared state between invocations.

use crate::crypto::{self, SALT_SIZE};
use crate::envelope::{Envelope, ENVELOPE_VERSION};
use crate::error::Result;
use rand::RngCore;
use std::num::NonZeroU32;

/// Default KDF work factor when the caller does not supply one
pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(1_000_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Seal-time parameters, passed in explicitly rather than read from
/// ambient globals so they stay testable and overridable.
#[derive(Debug, Clone)]
pub struct SealParams {
    /// PBKDF2 iteration count
    pub iterations: NonZeroU32,
    /// KDF salt; a fresh 16-byte random salt is drawn at seal time if unset
    pub salt: Option<Vec<u8>>,
}

impl Default for SealParams {
    fn default() -> Self {
        SealParams {
            iterations: DEFAULT_ITERATIONS,
            salt: None,
        }
    }
}

/// Seal a plaintext under a password, producing a version-1 envelope.
pub fn seal(plaintext: &[u8], password: &str, params: &SealParams) -> Result<Envelope> {
    let salt = match &params.salt {
        Some(salt) => salt.clone(),
        None => {
            let mut salt = vec![0u8; SALT_SIZE];
            rand::thread_rng().fill_bytes(&mut salt);
            salt
        }
    };

    let key = crypto::derive_key(password, params.iterations, &salt);
    let sealed = crypto::encrypt(key.key(), plaintext)?;

    Ok(Envelope {
        version: ENVELOPE_VERSION,
        iterations: params.iterations,
        salt,
        iv: sealed.nonce,
        ciphertext: sealed.ciphertext,
        tag: sealed.tag,
    })
}

/// Open an envelope with a password, recovering the plaintext.
///
/// The key is re-derived from the envelope's own iterations and salt. On
/// authentication failure the whole operation fails with no partial output.
pub fn open(envelope: &Envelope, password: &str) -> Result<Vec<u8>> {
    let key = crypto::derive_key(password, envelope.iterations, &envelope.salt);
    crypto::decrypt(key.key(), &envelope.iv, &envelope.ciphertext, &envelope.tag)
}
