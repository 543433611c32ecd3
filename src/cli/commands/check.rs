//! `docvault check`: verify a signed JSON document from a file or stdin.

use crate::cli::output;
use crate::cli::{prompt_secret, read_input};
use crate::crypto::DocumentSigner;
use crate::errors::Result;

/// Execute the `check` command.
pub fn execute(input: Option<&str>) -> Result<()> {
    let bytes = read_input(input)?;

    let signer = DocumentSigner::new(prompt_secret()?);
    let doc = signer.verify_document(&bytes)?;

    output::success(&format!("Signature valid ({} fields)", doc.len()));
    Ok(())
}
