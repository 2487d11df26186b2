//! `secretbook edit`: change a credential in place.

use crate::cli::output;
use crate::cli::{confirm, login, Cli, DetailArgs};
use crate::errors::{Result, SecretBookError};
use crate::vault::CredentialRecord;

/// Field changes requested on the command line.
pub struct EditArgs<'a> {
    pub website: Option<&'a str>,
    pub username: Option<&'a str>,
    pub prompt_password: bool,
    pub details: &'a DetailArgs,
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: u64, args: &EditArgs<'_>, yes: bool) -> Result<()> {
    let repo = login(cli)?;

    // `update` ignores unknown ids, so check existence here.
    let entry = repo
        .get(id)?
        .ok_or_else(|| SecretBookError::CommandFailed(format!("no credential with id {id}")))?;

    let new_password = if args.prompt_password {
        Some(
            dialoguer::Password::new()
                .with_prompt("New password")
                .interact()
                .map_err(|e| SecretBookError::CommandFailed(format!("password prompt: {e}")))?,
        )
    } else {
        None
    };

    let record = apply_edits(entry.record, args, new_password);
    if !record.has_required_fields() {
        return Err(SecretBookError::CommandFailed(
            "website, username and password are all required".into(),
        ));
    }

    match repo.update(id, &record, false) {
        Ok(()) => {}
        Err(SecretBookError::DuplicateFound(other)) => {
            output::warning(&format!(
                "Credential {} already uses {} / {}",
                other.id, other.record.website, other.record.username
            ));
            if !yes && !confirm("Save anyway?")? {
                output::info("Cancelled.");
                return Ok(());
            }
            repo.update(id, &record, true)?;
        }
        Err(e) => return Err(e),
    }

    output::success(&format!("Updated credential {id}"));
    Ok(())
}

fn apply_edits(
    mut record: CredentialRecord,
    args: &EditArgs<'_>,
    new_password: Option<String>,
) -> CredentialRecord {
    if let Some(website) = args.website {
        record.website = website.trim().to_string();
    }
    if let Some(username) = args.username {
        record.username = username.trim().to_string();
    }
    if let Some(password) = new_password {
        record.password = password;
    }
    if let Some(category) = &args.details.category {
        record.category = category.clone();
    }
    if let Some(url) = &args.details.url {
        record.url = url.clone();
    }
    if let Some(notes) = &args.details.notes {
        record.notes = notes.clone();
    }
    record
}
