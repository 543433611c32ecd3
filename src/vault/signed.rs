//! Signed JSON vault.
//!
//! Save: object → document → signed document → storage.
//! Load: storage → signed document → verified document → object.
//!
//! See `crypto::signer` for the artifact layout.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::Vault;
use crate::codec::{Codec, JsonCodec};
use crate::crypto::{DocumentSigner, VaultSecret};
use crate::document::Document;
use crate::errors::Result;
use crate::storage::{self, Storage};

/// Vault that signs JSON documents on save and verifies them on load.
#[derive(Debug)]
pub struct SignedVault<S> {
    storage: S,
    signer: DocumentSigner,
    extension: String,
}

impl<S: Storage> SignedVault<S> {
    /// Create a vault over `storage`, signing with `secret`.
    ///
    /// Artifacts use the `.json` extension unless overridden.
    pub fn new(storage: S, secret: VaultSecret) -> Self {
        Self {
            storage,
            signer: DocumentSigner::new(secret),
            extension: JsonCodec::EXTENSION.to_string(),
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

    pub fn signer(&self) -> &DocumentSigner {
        &self.signer
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Backend key for `name`, after validating it.
    pub fn key_for(&self, name: &str) -> Result<String> {
        storage::validate_name(name, &self.extension)?;
        self.storage.key_for(name, &self.extension)
    }

    /// Sign an already structured document and store it under `name`.
    pub fn save_document(&self, doc: Document, name: &str) -> Result<()> {
        let key = self.key_for(name)?;
        let bytes = self.signer.sign_document(doc)?.to_canonical_bytes()?;
        self.storage.write(&key, &bytes)?;

        debug!(name, %key, bytes = bytes.len(), "signed document saved");
        Ok(())
    }

    /// Load and verify a stored document, returning it without its signature.
    pub fn load_document(&self, name: &str) -> Result<Document> {
        let key = self.key_for(name)?;
        // A missing artifact is NotFound from the backend, before any parsing.
        let bytes = self.storage.read(&key)?;
        let doc = self.signer.verify_document(&bytes).map_err(|e| {
            if e.is_integrity_failure() {
                warn!(name, %key, error = %e, "rejected stored document");
            }
            e
        })?;

        debug!(name, %key, bytes = bytes.len(), "signed document verified");
        Ok(doc)
    }

    /// Check the integrity of the artifact stored under `name`.
    pub fn verify(&self, name: &str) -> Result<()> {
        self.load_document(name).map(|_| ())
    }
}

impl<S: Storage> Vault for SignedVault<S> {
    fn save<T: Serialize + ?Sized>(&self, data: &T, name: &str) -> Result<()> {
        self.save_document(Document::from_serializable(data)?, name)
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.load_document(name)?.into_typed()
    }
}
