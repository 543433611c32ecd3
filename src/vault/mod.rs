//! Vault module: save/load facades over a storage backend.
//!
//! This module provides:
//! - The `Vault` trait shared by every facade
//! - `SignedVault`: JSON documents carrying an embedded HMAC signature (`signed`)
//! - `PlainVault`: unsigned persistence with any `Codec` (`plain`)

pub mod plain;
pub mod signed;

// Re-export the most commonly used items.
pub use plain::PlainVault;
pub use signed::SignedVault;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;

/// Persist typed values under logical names.
///
/// Every call is independent: nothing is cached between a save and a
/// later load, and the only state a vault holds is its configuration.
pub trait Vault {
    /// Serialize `data` and store it under `name`, replacing any previous artifact.
    fn save<T: Serialize + ?Sized>(&self, data: &T, name: &str) -> Result<()>;

    /// Fetch the artifact stored under `name` and deserialize it.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T>;
}
