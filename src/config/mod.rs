//! Configuration module: project settings loaded from `.docvault.toml`.

pub mod settings;

pub use settings::{Backend, Settings};
