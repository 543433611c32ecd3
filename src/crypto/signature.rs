//! HMAC-SHA256 document tags.
//!
//! A tag authenticates exact bytes: `sign` is a pure function of the
//! bytes and the secret, and `verify` recomputes it and compares in
//! constant time.  Tags travel as standard base64 text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::{Result, VaultError};

/// Size of an HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Compute the HMAC-SHA256 tag of `bytes` keyed by `secret`.
pub fn sign(bytes: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = new_mac(secret)?;
    mac.update(bytes);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Check `tag` against the HMAC of `bytes` keyed by `secret`.
///
/// Uses `hmac::Mac::verify_slice`, which compares the full tag in
/// constant time.  A tag of the wrong length simply fails.
pub fn verify(bytes: &[u8], secret: &[u8], tag: &[u8]) -> Result<bool> {
    let mut mac = new_mac(secret)?;
    mac.update(bytes);
    Ok(mac.verify_slice(tag).is_ok())
}

/// Encode a raw tag as base64 text.
pub fn encode_tag(tag: &[u8]) -> String {
    BASE64.encode(tag)
}

/// Decode base64 text back into a raw tag.
///
/// Empty or undecodable text fails with `InvalidSignature`.
pub fn decode_tag(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(VaultError::InvalidSignature);
    }
    BASE64.decode(text).map_err(|_| VaultError::InvalidSignature)
}

fn new_mac(secret: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret)
        .map_err(|e| VaultError::HmacError(format!("invalid HMAC key: {e}")))
}
