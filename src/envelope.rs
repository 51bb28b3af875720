//! Envelope wire format
//!
//! The envelope is the only persisted artifact: a single line of `key=value`
//! pairs joined by `&`, URL-query encoded, byte fields as lowercase hex:
//!
//! ```text
//! iterations=<decimal>&salt=<hex>&cipherText=<hex>&iv=<hex>&tag=<hex>&version=1
//! ```
//!
//! This module owns versioning. Only version 1 is defined; there is no
//! upgrade path.

use crate::crypto::{NONCE_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use std::num::NonZeroU32;

/// The only protocol generation this codec recognizes
pub const ENVELOPE_VERSION: u32 = 1;

/// Sealed parameters and ciphertext, immutable once built.
///
/// Constructed in memory during seal and immediately externalized to text;
/// reconstructed from text at open time and discarded after the plaintext
/// is extracted.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Protocol generation, always [`ENVELOPE_VERSION`]
    pub version: u32,
    /// KDF work factor used at seal time
    pub iterations: NonZeroU32,
    /// KDF salt; 16 bytes when generated, any length accepted on decode
    pub salt: Vec<u8>,
    /// AEAD nonce
    pub iv: [u8; NONCE_SIZE],
    /// Ciphertext, same length as the original plaintext
    pub ciphertext: Vec<u8>,
    /// Authentication tag
    pub tag: [u8; TAG_SIZE],
}

impl Envelope {
    /// Serialize to the single-line wire format.
    ///
    /// Field order is not semantically significant but is kept stable for
    /// reproducibility.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("iterations", &self.iterations.to_string())
            .append_pair("salt", &hex::encode(&self.salt))
            .append_pair("cipherText", &hex::encode(&self.ciphertext))
            .append_pair("iv", &hex::encode(self.iv))
            .append_pair("tag", &hex::encode(self.tag))
            .append_pair("version", &self.version.to_string())
            .finish()
    }

    /// Parse an envelope from its wire format.
    ///
    /// If a key repeats, the first value wins. Missing keys, malformed hex,
    /// a tag that is not 16 bytes, an iv that is not 12 bytes, or an
    /// unrecognized version are all decode errors.
    pub fn decode(text: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(text.trim().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let version: u32 = field(&pairs, "version")?
            .parse()
            .map_err(|_| Error::Decode("malformed version".to_string()))?;
        if version != ENVELOPE_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let iterations: u32 = field(&pairs, "iterations")?
            .parse()
            .map_err(|_| Error::Decode("malformed iterations".to_string()))?;
        let iterations = NonZeroU32::new(iterations)
            .ok_or_else(|| Error::Decode("iterations must be at least 1".to_string()))?;

        let salt = hex_field(&pairs, "salt")?;
        let ciphertext = hex_field(&pairs, "cipherText")?;

        let iv: [u8; NONCE_SIZE] =
            hex_field(&pairs, "iv")?
                .try_into()
                .map_err(|v: Vec<u8>| Error::InvalidNonceLength {
                    expected: NONCE_SIZE,
                    got: v.len(),
                })?;

        let tag: [u8; TAG_SIZE] =
            hex_field(&pairs, "tag")?
                .try_into()
                .map_err(|v: Vec<u8>| Error::InvalidTagLength {
                    expected: TAG_SIZE,
                    got: v.len(),
                })?;

        Ok(Envelope {
            version,
            iterations,
            salt,
            iv,
            ciphertext,
            tag,
        })
    }
}

/// Look up a required key, taking the first occurrence if it repeats
fn field<'a>(pairs: &'a [(String, String)], key: &str) -> Result<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| Error::Decode(format!("missing field '{}'", key)))
}

fn hex_field(pairs: &[(String, String)], key: &str) -> Result<Vec<u8>> {
    hex::decode(field(pairs, key)?)
        .map_err(|_| Error::Decode(format!("malformed hex in field '{}'", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_envelope() -> Envelope {
        Envelope {
            version: ENVELOPE_VERSION,
            iterations: NonZeroU32::new(1000).unwrap(),
            salt: vec![0x00, 0xff],
            iv: [0x0a; NONCE_SIZE],
            ciphertext: vec![0x01, 0x02, 0x03],
            tag: [0x0b; TAG_SIZE],
        }
    }

    #[test]
    fn test_encode_stable_order() {
        let encoded = test_envelope().encode();
        assert_eq!(
            encoded,
            "iterations=1000&salt=00ff&cipherText=010203\
             &iv=0a0a0a0a0a0a0a0a0a0a0a0a\
             &tag=0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b&version=1"
        );
    }

    #[test]
    fn test_round_trip() {
        let envelope = test_envelope();
        let decoded = Envelope::decode(&envelope.encode()).unwrap();

        assert_eq!(decoded.version, envelope.version);
        assert_eq!(decoded.iterations, envelope.iterations);
        assert_eq!(decoded.salt, envelope.salt);
        assert_eq!(decoded.iv, envelope.iv);
        assert_eq!(decoded.ciphertext, envelope.ciphertext);
        assert_eq!(decoded.tag, envelope.tag);
    }

    #[test]
    fn test_field_order_not_significant() {
        let reordered = "version=1&tag=0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b\
                         &iv=0a0a0a0a0a0a0a0a0a0a0a0a&cipherText=010203\
                         &salt=00ff&iterations=1000";
        let decoded = Envelope::decode(reordered).unwrap();
        assert_eq!(decoded.iterations.get(), 1000);
        assert_eq!(decoded.ciphertext, vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let mut envelope = test_envelope();
        envelope.iterations = NonZeroU32::new(5).unwrap();
        let text = format!("{}&iterations=9", envelope.encode());

        let decoded = Envelope::decode(&text).unwrap();
        assert_eq!(decoded.iterations.get(), 5);
    }

    #[test]
    fn test_missing_tag_fails() {
        let text = "iterations=1000&salt=00ff&cipherText=010203\
                    &iv=0a0a0a0a0a0a0a0a0a0a0a0a&version=1";
        let err = Envelope::decode(text).unwrap_err();
        assert!(matches!(err, Error::Decode(ref msg) if msg.contains("tag")));
    }

    #[test]
    fn test_malformed_hex_fails() {
        let text = test_envelope().encode().replace("salt=00ff", "salt=zz");
        let err = Envelope::decode(&text).unwrap_err();
        assert!(matches!(err, Error::Decode(ref msg) if msg.contains("salt")));
    }

    #[test]
    fn test_unsupported_version_fails() {
        let text = test_envelope().encode().replace("version=1", "version=2");
        let err = Envelope::decode(&text).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(2)));
    }

    #[test]
    fn test_zero_iterations_fails() {
        let text = test_envelope()
            .encode()
            .replace("iterations=1000", "iterations=0");
        assert!(matches!(
            Envelope::decode(&text),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_short_tag_fails() {
        let text = test_envelope()
            .encode()
            .replace("tag=0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b", "tag=0b0b");
        let err = Envelope::decode(&text).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTagLength {
                expected: TAG_SIZE,
                got: 2
            }
        ));
    }

    #[test]
    fn test_short_iv_fails() {
        let text = test_envelope()
            .encode()
            .replace("iv=0a0a0a0a0a0a0a0a0a0a0a0a", "iv=0a0a");
        let err = Envelope::decode(&text).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidNonceLength {
                expected: NONCE_SIZE,
                got: 2
            }
        ));
    }

    #[test]
    fn test_any_salt_length_accepted() {
        let mut envelope = test_envelope();
        envelope.salt = vec![0x42; 7];
        let decoded = Envelope::decode(&envelope.encode()).unwrap();
        assert_eq!(decoded.salt, vec![0x42; 7]);
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let text = format!("{}\n", test_envelope().encode());
        assert!(Envelope::decode(&text).is_ok());
    }
}
