//! Serialization formats for unsigned vaults.
//!
//! - `JsonCodec`: compact JSON via `serde_json` (`.json`)
//! - `PostcardCodec`: compact binary via `postcard` (`.bin`)
//!
//! Only JSON supports field-level editing, so only JSON documents are
//! signed (see `vault::SignedVault`).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, VaultError};

/// Encode/decode contract for a storage format.
pub trait Codec: Send + Sync {
    /// Default file extension, without the leading dot.
    const EXTENSION: &'static str;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    const EXTENSION: &'static str = "json";

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| VaultError::SerializationError(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| VaultError::DeserializationError(e.to_string()))
    }
}

/// Compact binary (postcard wire format).
#[derive(Debug, Clone, Copy, Default)]
pub struct PostcardCodec;

impl Codec for PostcardCodec {
    const EXTENSION: &'static str = "bin";

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        postcard::to_stdvec(value).map_err(|e| VaultError::SerializationError(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        postcard::from_bytes(bytes).map_err(|e| VaultError::DeserializationError(e.to_string()))
    }
}
