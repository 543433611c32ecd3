//! Local filesystem backend.
//!
//! Artifacts live at `<base_dir>/<name>.<extension>`.  Every write goes
//! to a uniquely named temp file in the same directory and is then
//! renamed over the target, so readers never observe a half-written
//! artifact and concurrent writers to one name resolve last-writer-wins.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::Storage;
use crate::errors::{Result, VaultError};

/// Disambiguates temp files written concurrently by this process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores artifacts as files under a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_dir: PathBuf,
}

impl LocalStorage {
    /// Create a backend rooted at `base_dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path of the artifact for `name`.
    pub fn path_for(&self, name: &str, extension: &str) -> PathBuf {
        if extension.is_empty() {
            self.base_dir.join(name)
        } else {
            self.base_dir.join(format!("{name}.{extension}"))
        }
    }
}

impl Storage for LocalStorage {
    /// The key is the artifact path, which must be valid UTF-8.
    fn key_for(&self, name: &str, extension: &str) -> Result<String> {
        let path = self.path_for(name, extension);
        path.to_str().map(str::to_string).ok_or_else(|| {
            VaultError::ConfigError(format!(
                "storage directory {} is not valid UTF-8",
                path.display()
            ))
        })
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = Path::new(key);
        let io_err = |source: std::io::Error| VaultError::StorageIo {
            path: path.to_path_buf(),
            source,
        };

        let parent = path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(io_err)?;

        let tmp_path = unique_tmp_path(path);
        let written = write_synced(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(source));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = Path::new(key);
        fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                VaultError::NotFound(key.to_string())
            } else {
                VaultError::StorageIo {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let path = Path::new(key);
        path.try_exists().map_err(|source| VaultError::StorageIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn unique_tmp_path(target: &Path) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    target.with_file_name(format!(".{file_name}.{}.{counter}.tmp", std::process::id()))
}
