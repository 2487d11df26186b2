//! `secretbook add`: store a new credential.

use crate::cli::output;
use crate::cli::{confirm, login, Cli, DetailArgs};
use crate::errors::{Result, SecretBookError};
use crate::vault::CredentialRecord;

/// Execute the `add` command.
///
/// If the website/username pair already exists, the user is asked
/// whether to update that entry instead (`--yes` answers for them).
pub fn execute(
    cli: &Cli,
    website: &str,
    username: &str,
    password: Option<&str>,
    details: &DetailArgs,
    yes: bool,
) -> Result<()> {
    let repo = login(cli)?;

    let password = match password {
        Some(p) => p.to_string(),
        None => dialoguer::Password::new()
            .with_prompt(format!("Password for {website} / {username}"))
            .interact()
            .map_err(|e| SecretBookError::CommandFailed(format!("password prompt: {e}")))?,
    };

    let record = CredentialRecord {
        category: details.category.clone().unwrap_or_default(),
        url: details.url.clone().unwrap_or_default(),
        notes: details.notes.clone().unwrap_or_default(),
        ..CredentialRecord::new(website.trim(), username.trim(), &password)
    };
    if !record.has_required_fields() {
        return Err(SecretBookError::CommandFailed(
            "website, username and password are all required".into(),
        ));
    }

    match repo.save(&record, false) {
        Ok(id) => {
            output::success(&format!("Added credential {id} for {website} / {username}"));
            Ok(())
        }
        Err(SecretBookError::DuplicateFound(existing)) => {
            output::warning(&format!(
                "{} / {} already exists (id {}, created {})",
                existing.record.website,
                existing.record.username,
                existing.id,
                existing.created_at.format("%Y-%m-%d %H:%M:%S")
            ));

            if !yes && !confirm("Update the existing credential?")? {
                output::info("Cancelled.");
                return Ok(());
            }

            repo.update(existing.id, &record, true)?;
            output::success(&format!("Updated credential {}", existing.id));
            Ok(())
        }
        Err(e) => Err(e),
    }
}
