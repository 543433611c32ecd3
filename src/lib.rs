pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod document;
pub mod errors;
pub mod storage;
pub mod vault;

pub use crypto::VaultSecret;
pub use document::{Document, SIGNATURE_FIELD};
pub use errors::{Result, VaultError};
pub use vault::{PlainVault, SignedVault, Vault};
