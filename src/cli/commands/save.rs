//! `docvault save`: sign a JSON object and store it.

use crate::cli::output;
use crate::cli::{open_vault, read_input, Cli};
use crate::document::Document;
use crate::errors::Result;

/// Execute the `save` command.
pub fn execute(cli: &Cli, name: &str, input: Option<&str>) -> Result<()> {
    // Parse before prompting so bad input fails fast.
    let bytes = read_input(input)?;
    let doc = Document::parse(&bytes)?;

    let vault = open_vault(cli)?;
    let key = vault.key_for(name)?;
    if vault.storage().exists(&key)? {
        output::info(&format!("Replacing existing document at {key}"));
    }
    vault.save_document(doc, name)?;

    output::success(&format!("Signed document '{name}' saved to {key}"));
    output::tip(&format!("Run `docvault load {name}` to read it back."));

    Ok(())
}
