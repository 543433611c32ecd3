//! Embedding and checking document signatures.
//!
//! A signed document is the original document with one extra top-level
//! field appended:
//!
//! ```text
//! {"field":...,"other":...,"signature":"<base64 HMAC-SHA256>"}
//! ```
//!
//! The tag authenticates the canonical bytes of the document **without**
//! the `signature` field.  Verification recomputes those bytes from the
//! parsed artifact and rejects the document unless the tag matches.

use serde_json::Value;

use super::secret::VaultSecret;
use super::signature;
use crate::document::{Document, SIGNATURE_FIELD};
use crate::errors::{Result, VaultError};

/// Signs and verifies documents with one shared secret.
#[derive(Debug, Clone)]
pub struct DocumentSigner {
    secret: VaultSecret,
}

impl DocumentSigner {
    pub fn new(secret: VaultSecret) -> Self {
        Self { secret }
    }

    /// Append a `signature` field authenticating the rest of `doc`.
    ///
    /// Documents that already use the reserved field name are rejected.
    pub fn sign_document(&self, doc: Document) -> Result<Document> {
        if doc.contains(SIGNATURE_FIELD) {
            return Err(VaultError::SerializationError(format!(
                "field `{SIGNATURE_FIELD}` is reserved for the document signature"
            )));
        }

        let canonical = doc.to_canonical_bytes()?;
        let tag = signature::sign(&canonical, self.secret.as_bytes())?;
        Ok(doc.with_field(SIGNATURE_FIELD, Value::String(signature::encode_tag(&tag))))
    }

    /// Verify signed bytes and return the document without its signature.
    ///
    /// Fails with `MalformedDocument` if the bytes do not parse, and with
    /// `InvalidSignature` if the tag is absent, empty, undecodable, or wrong.
    pub fn verify_document(&self, bytes: &[u8]) -> Result<Document> {
        let doc = Document::parse(bytes)?;

        let tag = match doc.get(SIGNATURE_FIELD) {
            Some(Value::String(text)) => signature::decode_tag(text)?,
            _ => return Err(VaultError::InvalidSignature),
        };

        let unsigned = doc.without_field(SIGNATURE_FIELD);
        let canonical = unsigned.to_canonical_bytes()?;
        if !signature::verify(&canonical, self.secret.as_bytes(), &tag)? {
            return Err(VaultError::InvalidSignature);
        }

        Ok(unsigned)
    }
}
