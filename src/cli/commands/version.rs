//! `docvault version`: display version and build features.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("docvault {current}");

    let http = if cfg!(feature = "http") {
        style("enabled").green()
    } else {
        style("disabled").red()
    };
    println!("  http backend: {http}");

    Ok(())
}
