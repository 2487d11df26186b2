//! `secretbook get` / `secretbook copy`: reveal a single password.

use crate::cli::output;
use crate::cli::{login, Cli};
use crate::errors::{Result, SecretBookError};
use crate::vault::CredentialEntry;

/// Execute the `get` command: print the password to stdout.
pub fn execute(cli: &Cli, id: u64) -> Result<()> {
    let entry = lookup(cli, id)?;
    println!("{}", entry.record.password);
    Ok(())
}

/// Execute the `copy` command: put the password on the clipboard.
pub fn execute_copy(cli: &Cli, id: u64) -> Result<()> {
    let entry = lookup(cli, id)?;

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| SecretBookError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(entry.record.password.clone())
        .map_err(|e| SecretBookError::CommandFailed(format!("clipboard write failed: {e}")))?;

    output::success(&format!(
        "Copied password for {} / {} to the clipboard",
        entry.record.website, entry.record.username
    ));
    Ok(())
}

fn lookup(cli: &Cli, id: u64) -> Result<CredentialEntry> {
    let repo = login(cli)?;
    repo.get(id)?
        .ok_or_else(|| SecretBookError::CommandFailed(format!("no credential with id {id}")))
}
