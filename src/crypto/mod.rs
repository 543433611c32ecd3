//! Cryptographic primitives for DocVault.
//!
//! This module provides:
//! - HMAC-SHA256 tags with constant-time verification (`signature`)
//! - The zeroizing `VaultSecret` key holder (`secret`)
//! - `DocumentSigner`, which embeds and checks signatures in documents (`signer`)

pub mod secret;
pub mod signature;
pub mod signer;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{sign, verify, DocumentSigner, ...};
pub use secret::VaultSecret;
pub use signature::{decode_tag, encode_tag, sign, verify, TAG_LEN};
pub use signer::DocumentSigner;
