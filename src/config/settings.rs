use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Which storage backend the CLI talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Files under `base_dir`.
    #[default]
    Local,
    /// A remote endpoint reached over HTTP(S).
    Http,
}

/// Project-level configuration, loaded from `.docvault.toml`.
///
/// Every field has a sensible default so DocVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Storage backend (`local` or `http`).
    #[serde(default)]
    pub backend: Backend,

    /// Directory (relative to project root) where signed documents are stored.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Artifact file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Base URL documents are loaded from (HTTP backend).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_url: Option<String>,

    /// Base URL documents are saved to. Defaults to `get_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,

    /// Per-request timeout for the HTTP backend, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_base_dir() -> String {
    ".docvault".to_string()
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            base_dir: default_base_dir(),
            extension: default_extension(),
            get_url: None,
            post_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".docvault.toml";

    /// Load settings from `<project_dir>/.docvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Directory holding local artifacts.
    ///
    /// Example: `project_dir/.docvault`
    pub fn storage_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.base_dir)
    }

    /// Resolve the (GET, POST) base URLs for the HTTP backend.
    pub fn http_urls(&self) -> Result<(String, String)> {
        let get_url = self.get_url.clone().ok_or_else(|| {
            VaultError::ConfigError("the http backend needs `get_url` (or --url)".into())
        })?;
        let post_url = self.post_url.clone().unwrap_or_else(|| get_url.clone());
        Ok((get_url, post_url))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
