use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in DocVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Load errors ---
    #[error("No stored document at {0}")]
    NotFound(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Signature verification failed: document is missing a valid signature or was tampered with")]
    InvalidSignature,

    // --- Conversion errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Invalid document name: {0}")]
    InvalidName(String),

    // --- Crypto errors ---
    #[error("HMAC error: {0}")]
    HmacError(String),

    // --- Backend errors ---
    #[error("Storage error at {}: {source}", .path.display())]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request to {url} failed with status code {status}")]
    HttpResponse { status: u16, url: String },

    #[error("HTTP transport error: {0}")]
    HttpTransport(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl VaultError {
    /// Returns `true` for failures that mean the stored bytes must not be trusted.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            VaultError::InvalidSignature | VaultError::MalformedDocument(_)
        )
    }

    /// HTTP status code, if this error came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VaultError::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience type alias for DocVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
