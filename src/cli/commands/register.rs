//! `secretbook register`: create a new, empty account.

use crate::cli::output;
use crate::cli::{account_name, open_repository, prompt_new_password, Cli};
use crate::errors::Result;

/// Execute the `register` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (settings, repo) = open_repository(cli)?;
    let name = account_name(cli, &settings)?;

    let secret = prompt_new_password(settings.min_password_len)?;
    repo.register(&name, &secret)?;

    output::success(&format!("Account '{name}' registered"));
    output::tip(&format!(
        "Run `secretbook --account {name} add <WEBSITE> <USERNAME>` to add a credential."
    ));

    Ok(())
}
