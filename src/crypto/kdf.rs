//! Password-based key derivation
//!
//! PBKDF2 with an HMAC-SHA-256 core, always producing a 256-bit key. The
//! iteration count is the tunable work factor and must match between seal
//! and open; it travels in the envelope, the password does not.

use crate::crypto::KEY_SIZE;
use ring::pbkdf2;
use std::num::NonZeroU32;
use zeroize::Zeroizing;

/// Key derived from a password, wiped from memory on drop.
///
/// Never serialized; owned exclusively by the seal or open call that
/// computed it.
pub struct DerivedKey {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl DerivedKey {
    /// Get the raw key bytes
    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Derive a 256-bit key from a password, salt, and iteration count.
///
/// Deterministic: identical inputs always yield the identical key. An empty
/// password is allowed; a zero iteration count is unrepresentable.
pub fn derive_key(password: &str, iterations: NonZeroU32, salt: &[u8]) -> DerivedKey {
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password.as_bytes(),
        &mut *key,
    );
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iters(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_key_is_256_bits() {
        let derived = derive_key("password", iters(1), b"salt");
        assert_eq!(derived.key().len(), KEY_SIZE);
    }

    #[test]
    fn test_deterministic() {
        let a = derive_key("correct horse", iters(10), b"0123456789abcdef");
        let b = derive_key("correct horse", iters(10), b"0123456789abcdef");
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_known_vector() {
        // PBKDF2-HMAC-SHA256("password", "salt", c=1, dkLen=32)
        let derived = derive_key("password", iters(1), b"salt");
        assert_eq!(
            hex::encode(derived.key()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_salt_changes_key() {
        let a = derive_key("password", iters(2), b"salt-a");
        let b = derive_key("password", iters(2), b"salt-b");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_iterations_change_key() {
        let a = derive_key("password", iters(1), b"salt");
        let b = derive_key("password", iters(2), b"salt");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_empty_password_allowed() {
        let derived = derive_key("", iters(1), b"salt");
        assert_eq!(derived.key().len(), KEY_SIZE);
    }
}
