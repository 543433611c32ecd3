//! `docvault verify`: check a stored document's signature.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `verify` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let key = vault.key_for(name)?;

    if let Err(e) = vault.verify(name) {
        if e.is_integrity_failure() {
            output::warning("Do not use the contents of this document.");
        }
        return Err(e);
    }

    output::success(&format!("Signature valid for {key}"));
    Ok(())
}
