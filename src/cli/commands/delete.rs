//! `secretbook delete`: remove a credential.

use crate::cli::output;
use crate::cli::{confirm, login, Cli};
use crate::errors::{Result, SecretBookError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: u64, force: bool) -> Result<()> {
    let repo = login(cli)?;

    let entry = repo
        .get(id)?
        .ok_or_else(|| SecretBookError::CommandFailed(format!("no credential with id {id}")))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let prompt = format!(
            "Delete credential {id} ({} / {})?",
            entry.record.website, entry.record.username
        );
        if !confirm(&prompt)? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    repo.delete(id)?;
    output::success(&format!("Deleted credential {id}"));

    Ok(())
}
