//! `secretbook list` / `secretbook categories`: browse credentials.

use crate::cli::output;
use crate::cli::{login, Cli};
use crate::errors::Result;
use crate::vault::{categories, CategoryFilter, CredentialFilter};

/// Execute the `list` command.
pub fn execute(
    cli: &Cli,
    search: Option<&str>,
    category: Option<&str>,
    uncategorized: bool,
    show: bool,
) -> Result<()> {
    let repo = login(cli)?;
    let entries = repo.list_credentials()?;

    let filter = build_filter(search, category, uncategorized);
    let shown = filter.apply(&entries);

    output::info(&format!(
        "Showing {} of {} credential(s)",
        shown.len(),
        entries.len()
    ));
    output::print_credentials_table(&shown, show);

    Ok(())
}

/// Execute the `categories` command.
pub fn execute_categories(cli: &Cli) -> Result<()> {
    let repo = login(cli)?;
    let entries = repo.list_credentials()?;

    let names = categories(&entries);
    if names.is_empty() {
        output::info("No categories in use.");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }

    Ok(())
}

fn build_filter(search: Option<&str>, category: Option<&str>, uncategorized: bool) -> CredentialFilter {
    let category = if uncategorized {
        Some(CategoryFilter::Uncategorized)
    } else {
        category.map(|c| CategoryFilter::Named(c.to_string()))
    };

    CredentialFilter {
        search: search.map(str::to_string),
        category,
    }
}
