//! Storage backends.
//!
//! A backend persists opaque bytes under a key derived from a logical
//! document name plus a file extension:
//! - `LocalStorage`: files under a base directory (`local`)
//! - `HttpStorage`: POST/GET against a remote endpoint (`http`, behind the
//!   `http` feature)

pub mod local;

#[cfg(feature = "http")]
pub mod http;

pub use local::LocalStorage;

#[cfg(feature = "http")]
pub use http::HttpStorage;

use crate::errors::{Result, VaultError};

/// Maximum length of a logical document name.
const MAX_NAME_LEN: usize = 255;

/// Byte storage capability used by the vaults.
///
/// Implementations hold no per-call state, so one backend can serve
/// concurrent calls for different names.  Concurrent writes to the same
/// key are last-writer-wins.
pub trait Storage: Send + Sync {
    /// Build the backend key for an already validated `name`.
    ///
    /// Fails if the backend location cannot be expressed as a key.
    fn key_for(&self, name: &str, extension: &str) -> Result<String>;

    /// Store `bytes` under `key`, replacing any previous artifact.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Fetch the bytes stored under `key`.
    ///
    /// A missing artifact must fail with `VaultError::NotFound`.
    fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Whether an artifact exists under `key`.
    fn exists(&self, key: &str) -> Result<bool>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn key_for(&self, name: &str, extension: &str) -> Result<String> {
        (**self).key_for(name, extension)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).write(key, bytes)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read(key)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn key_for(&self, name: &str, extension: &str) -> Result<String> {
        (**self).key_for(name, extension)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).write(key, bytes)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read(key)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }
}

/// Validate a caller-supplied logical name.
///
/// Allowed: any non-empty name up to 255 bytes without path separators,
/// `..`, control characters, whitespace, or the URL delimiters `#`, `?`
/// and `%`.  The name must not already carry the `.<extension>` suffix;
/// the backend appends it.
pub fn validate_name(name: &str, extension: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultError::InvalidName("name cannot be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(VaultError::InvalidName(format!(
            "name cannot exceed {MAX_NAME_LEN} bytes"
        )));
    }
    if name.contains(|c: char| c == '/' || c == '\\')
        || name.contains("..")
        || name.chars().any(char::is_control)
    {
        return Err(VaultError::InvalidName(format!(
            "'{name}' must not contain path separators, '..', or control characters"
        )));
    }
    // Names are used verbatim as HTTP path segments.
    if let Some(c) = name
        .chars()
        .find(|&c| c == '#' || c == '?' || c == '%' || c.is_whitespace())
    {
        return Err(VaultError::InvalidName(format!(
            "'{name}' must not contain {c:?}"
        )));
    }
    if !extension.is_empty() && name.ends_with(&format!(".{extension}")) {
        return Err(VaultError::InvalidName(format!(
            "'{name}' already ends with .{extension}; pass the name without the extension"
        )));
    }
    Ok(())
}
