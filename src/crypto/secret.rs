//! The shared signing secret.

use std::fmt;

use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Secret bytes used as the HMAC key.
///
/// Held for the lifetime of a vault and wiped from memory on drop.
/// `Debug` output is redacted so the secret never reaches a log line.
#[derive(Clone)]
pub struct VaultSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl VaultSecret {
    /// Wrap raw secret bytes. Empty secrets are rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(VaultError::ConfigError("signing secret cannot be empty".into()));
        }
        Ok(Self { bytes })
    }

    /// Use the UTF-8 bytes of a text secret.
    pub fn from_text(secret: &str) -> Result<Self> {
        Self::new(secret.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for VaultSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultSecret(<redacted>)")
    }
}
