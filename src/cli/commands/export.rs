//! `secretbook export`: write all credentials to an encrypted bundle.
//!
//! The bundle is encrypted with the account's key, so only the same
//! account name can import it again.

use std::path::Path;

use crate::cli::output;
use crate::cli::{login, Cli};
use crate::errors::{Result, SecretBookError};
use crate::transfer::export_all;

/// Execute the `export` command.
pub fn execute(cli: &Cli, dest: &Path) -> Result<()> {
    let repo = login(cli)?;

    // Safety: refuse to export over the account store itself.
    if is_same_file(dest, repo.store().path()) {
        return Err(SecretBookError::CommandFailed(
            "refusing to export over the account store".into(),
        ));
    }

    let count = repo.list_credentials()?.len();
    if count == 0 {
        output::warning("No credentials to export.");
        return Ok(());
    }

    let bundle = export_all(&repo)?;
    bundle.write(dest)?;

    output::success(&format!(
        "Exported {count} credential(s) to {}",
        dest.display()
    ));
    output::tip("The bundle can only be imported by this same account.");

    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
