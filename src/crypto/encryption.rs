//! AES-256-GCM Encryption Implementation
//!
//! The sealed phrase is encrypted using AES-256-GCM which provides:
//! - Confidentiality: the recovery phrase is encrypted
//! - Integrity: any tampering is detected
//! - Authentication: verifies the envelope was sealed under this password

use crate::crypto::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use rand::RngCore;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};

/// Output of one encrypt call: nonce, ciphertext, and authentication tag
/// held as separate fields so the envelope codec can frame each one.
#[derive(Debug, Clone)]
pub struct SealedBox {
    /// Nonce used for encryption (unique per encryption)
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
    /// Authentication tag over {nonce, empty AAD, ciphertext}
    pub tag: [u8; TAG_SIZE],
}

/// Encrypt data using AES-256-GCM
///
/// Draws a fresh 12-byte nonce from the thread CSPRNG on every call. The
/// associated data is empty; it is authenticated but carries nothing.
pub fn encrypt(key: &[u8; KEY_SIZE], plaintext: &[u8]) -> Result<SealedBox> {
    // Create the key
    let unbound_key = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| Error::Encryption("Failed to create encryption key".to_string()))?;
    let sealing_key = LessSafeKey::new(unbound_key);

    // Generate random nonce
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Prepare buffer: plaintext + space for tag
    let mut in_out = plaintext.to_vec();
    in_out.reserve(TAG_SIZE);

    // Encrypt in place
    sealing_key
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| Error::Encryption("Encryption failed".to_string()))?;

    // The tag is the fixed-size suffix of the combined output
    let tag_suffix = in_out.split_off(in_out.len() - TAG_SIZE);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&tag_suffix);

    Ok(SealedBox {
        nonce: nonce_bytes,
        ciphertext: in_out,
        tag,
    })
}

/// Decrypt data using AES-256-GCM
///
/// Fails closed with [`Error::Authentication`] whenever the tag does not
/// verify against {key, nonce, empty AAD, ciphertext}. No partial plaintext
/// is ever returned and the sub-cause is not distinguishable.
pub fn decrypt(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> Result<Vec<u8>> {
    // Create the key
    let unbound_key = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| Error::Encryption("Failed to create decryption key".to_string()))?;
    let opening_key = LessSafeKey::new(unbound_key);

    let nonce = Nonce::assume_unique_for_key(*nonce);

    // Rejoin ciphertext and tag into the combined form the primitive expects
    let mut in_out = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    in_out.extend_from_slice(ciphertext);
    in_out.extend_from_slice(tag);

    // Decrypt in place
    let plaintext = opening_key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| Error::Authentication)?;

    Ok(plaintext.to_vec())
}
