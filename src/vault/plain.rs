//! Unsigned vault for any codec.
//!
//! Stores the codec output as-is.  There is no integrity layer: binary
//! formats such as postcard have no field structure to embed a signature
//! in, so `PlainVault` suits caches and trusted storage only.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::Vault;
use crate::codec::Codec;
use crate::errors::Result;
use crate::storage::{self, Storage};

/// Vault that persists codec output without signing it.
#[derive(Debug, Clone)]
pub struct PlainVault<S, C> {
    storage: S,
    codec: C,
    extension: String,
}

impl<S: Storage, C: Codec> PlainVault<S, C> {
    /// Create a vault using the codec's default extension.
    pub fn new(storage: S, codec: C) -> Self {
        Self {
            storage,
            codec,
            extension: C::EXTENSION.to_string(),
        }
    }

    /// Override the artifact extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn key_for(&self, name: &str) -> Result<String> {
        storage::validate_name(name, &self.extension)?;
        self.storage.key_for(name, &self.extension)
    }
}

impl<S: Storage, C: Codec> Vault for PlainVault<S, C> {
    fn save<T: Serialize + ?Sized>(&self, data: &T, name: &str) -> Result<()> {
        let key = self.key_for(name)?;
        let bytes = self.codec.encode(data)?;
        self.storage.write(&key, &bytes)?;

        debug!(name, %key, bytes = bytes.len(), "document saved");
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let key = self.key_for(name)?;
        let bytes = self.storage.read(&key)?;
        debug!(name, %key, bytes = bytes.len(), "document loaded");
        self.codec.decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, PostcardCodec};
    use crate::errors::VaultError;
    use crate::storage::LocalStorage;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Inventory {
        items: Vec<String>,
        gold: u64,
    }

    fn inventory() -> Inventory {
        Inventory {
            items: vec!["sword".into(), "lamp".into()],
            gold: 1_250,
        }
    }

    #[test]
    fn postcard_roundtrip_uses_bin_extension() {
        let tmp = TempDir::new().unwrap();
        let vault = PlainVault::new(LocalStorage::new(tmp.path()), PostcardCodec);

        vault.save(&inventory(), "hero").unwrap();
        assert!(tmp.path().join("hero.bin").exists());
        assert_eq!(vault.load::<Inventory>("hero").unwrap(), inventory());
    }

    #[test]
    fn json_roundtrip_with_custom_extension() {
        let tmp = TempDir::new().unwrap();
        let vault =
            PlainVault::new(LocalStorage::new(tmp.path()), JsonCodec).with_extension("save");

        vault.save(&inventory(), "hero").unwrap();
        assert_eq!(vault.extension(), "save");
        assert_eq!(vault.load::<Inventory>("hero").unwrap(), inventory());
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let vault = PlainVault::new(LocalStorage::new(tmp.path()), PostcardCodec);
        assert!(matches!(
            vault.load::<Inventory>("nobody"),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn wrong_shape_is_deserialization_error() {
        let tmp = TempDir::new().unwrap();
        let vault = PlainVault::new(LocalStorage::new(tmp.path()), JsonCodec);
        vault.save(&vec![1, 2, 3], "numbers").unwrap();
        assert!(matches!(
            vault.load::<Inventory>("numbers"),
            Err(VaultError::DeserializationError(_))
        ));
    }
}
