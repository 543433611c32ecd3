//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, Read};
use std::path::Path;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{Backend, Settings};
use crate::crypto::VaultSecret;
use crate::errors::{Result, VaultError};
use crate::storage::{LocalStorage, Storage};
use crate::vault::SignedVault;

/// Environment variable consulted for the signing secret.
pub const SECRET_ENV: &str = "DOCVAULT_SECRET";

/// DocVault CLI: signed JSON document storage.
#[derive(Parser)]
#[command(
    name = "docvault",
    about = "Store JSON documents with tamper-evident HMAC signatures",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage directory for the local backend (default: .docvault)
    #[arg(long, global = true)]
    pub base_dir: Option<String>,

    /// Storage backend (default: local)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Base URL for the http backend, used for both GET and POST
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Log vault operations to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Sign a JSON object and store it under NAME
    Save {
        /// Logical document name (without extension)
        name: String,
        /// Read the document from this file instead of stdin
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Verify a stored document and print it without its signature
    Load {
        /// Logical document name (without extension)
        name: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check a stored document's signature
    Verify {
        /// Logical document name (without extension)
        name: String,
    },

    /// Sign a JSON object and print the signed document (no storage)
    Sign {
        /// Read the document from this file instead of stdin
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Verify a signed JSON document (no storage)
    Check {
        /// Read the document from this file instead of stdin
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the signing secret, trying in order:
/// 1. `DOCVAULT_SECRET` env var (CI/CD)
/// 2. Interactive prompt
pub fn prompt_secret() -> Result<VaultSecret> {
    if let Ok(secret) = std::env::var(SECRET_ENV) {
        if !secret.is_empty() {
            let secret = Zeroizing::new(secret);
            return VaultSecret::from_text(&secret);
        }
    }

    let secret = dialoguer::Password::new()
        .with_prompt("Enter signing secret")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("secret prompt: {e}")))?;
    let secret = Zeroizing::new(secret);
    VaultSecret::from_text(&secret)
}

/// Load `.docvault.toml` from the working directory and apply CLI overrides.
pub fn resolve_settings(cli: &Cli, project_dir: &Path) -> Result<Settings> {
    let mut settings = Settings::load(project_dir)?;
    if let Some(dir) = &cli.base_dir {
        settings.base_dir = dir.clone();
    }
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(url) = &cli.url {
        settings.get_url = Some(url.clone());
        settings.post_url = Some(url.clone());
    }
    Ok(settings)
}

/// Build the storage backend selected by the settings.
pub fn build_storage(settings: &Settings, project_dir: &Path) -> Result<Box<dyn Storage>> {
    match settings.backend {
        Backend::Local => Ok(Box::new(LocalStorage::new(
            settings.storage_dir(project_dir),
        ))),
        Backend::Http => http_storage(settings),
    }
}

#[cfg(feature = "http")]
fn http_storage(settings: &Settings) -> Result<Box<dyn Storage>> {
    let (get_url, post_url) = settings.http_urls()?;
    Ok(Box::new(crate::storage::HttpStorage::with_urls(
        &get_url,
        &post_url,
        settings.timeout(),
    )))
}

#[cfg(not(feature = "http"))]
fn http_storage(_settings: &Settings) -> Result<Box<dyn Storage>> {
    Err(VaultError::ConfigError(
        "this build has no http backend; rebuild with `--features http`".into(),
    ))
}

/// Open the signed vault described by the CLI arguments and config file.
pub fn open_vault(cli: &Cli) -> Result<SignedVault<Box<dyn Storage>>> {
    let cwd = std::env::current_dir()?;
    let settings = resolve_settings(cli, &cwd)?;
    let storage = build_storage(&settings, &cwd)?;
    let secret = prompt_secret()?;
    Ok(SignedVault::new(storage, secret).with_extension(settings.extension))
}

/// Read command input from a file, or from stdin when no path is given.
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
