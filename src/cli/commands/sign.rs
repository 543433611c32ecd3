//! `docvault sign`: sign a JSON object and print it, without storing it.

use crate::cli::output;
use crate::cli::{prompt_secret, read_input};
use crate::crypto::DocumentSigner;
use crate::document::Document;
use crate::errors::Result;

/// Execute the `sign` command.
pub fn execute(input: Option<&str>) -> Result<()> {
    let bytes = read_input(input)?;
    let doc = Document::parse(&bytes)?;

    let signer = DocumentSigner::new(prompt_secret()?);
    let signed = signer.sign_document(doc)?.to_canonical_bytes()?;
    output::document(&String::from_utf8_lossy(&signed));

    Ok(())
}
