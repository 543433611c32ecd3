//! `docvault load`: verify a stored document and print it.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `load` command.
pub fn execute(cli: &Cli, name: &str, pretty: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let doc = vault.load_document(name)?;

    let body = if pretty {
        doc.to_pretty_string()?
    } else {
        String::from_utf8_lossy(&doc.to_canonical_bytes()?).into_owned()
    };
    output::document(&body);

    Ok(())
}
