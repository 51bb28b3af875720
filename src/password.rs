//! Password provisioning for seal and open
//!
//! The password is never serialized into the envelope; only its KDF output
//! is used. A generated password therefore has to be shown to the user
//! out-of-band so it can be re-entered at open time.

use crate::error::{Error, Result};
use rand::RngCore;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Entropy drawn for a generated password, before text encoding
pub const GENERATED_PASSWORD_BYTES: usize = 32;

/// Where the password for a seal or open operation comes from
#[derive(Debug, Clone)]
pub enum PasswordSource {
    /// Prompt on the controlling terminal, no echo
    Interactive,
    /// Draw 32 random bytes and encode them as printable Z85 text
    Generated,
    /// Read from a file, trimmed
    File(PathBuf),
}

/// A resolved password, wiped from memory on drop
pub struct Password {
    text: Zeroizing<String>,
    generated: bool,
}

impl Password {
    /// The raw password text, no normalization applied
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if this password was freshly generated and still needs to be
    /// communicated to the user
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

impl PasswordSource {
    /// Resolve this source into a password
    pub fn obtain(&self) -> Result<Password> {
        match self {
            PasswordSource::Interactive => {
                let text = rpassword::prompt_password("Enter encryption password: ")
                    .map_err(|e| Error::Password(e.to_string()))?;
                Ok(Password {
                    text: Zeroizing::new(text),
                    generated: false,
                })
            }
            PasswordSource::Generated => {
                let mut bytes = Zeroizing::new([0u8; GENERATED_PASSWORD_BYTES]);
                rand::thread_rng().fill_bytes(&mut *bytes);
                Ok(Password {
                    text: Zeroizing::new(z85::encode(&*bytes)),
                    generated: true,
                })
            }
            PasswordSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    Error::Password(format!("Failed to read password file: {}", e))
                })?;
                Ok(Password {
                    text: Zeroizing::new(text.trim().to_string()),
                    generated: false,
                })
            }
        }
    }
}
