//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{CredentialEntry, CredentialRecord};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Mask a password for display.
pub fn mask(password: &str) -> String {
    "\u{2022}".repeat(password.chars().count().clamp(4, 12))
}

/// Print a table of credentials (Id, Website, Username, Password,
/// Category, URL, Notes, Updated).
pub fn print_credentials_table(entries: &[&CredentialEntry], show_passwords: bool) {
    if entries.is_empty() {
        info("No credentials to show.");
        tip("Run `secretbook add <WEBSITE> <USERNAME>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Website", "Username", "Password", "Category", "URL", "Notes", "Updated",
    ]);

    for e in entries {
        let r = &e.record;
        let password = if show_passwords {
            r.password.clone()
        } else {
            mask(&r.password)
        };
        let updated = e.updated_at.unwrap_or(e.created_at);
        table.add_row(vec![
            e.id.to_string(),
            r.website.clone(),
            r.username.clone(),
            password,
            r.category.clone(),
            r.url.clone(),
            r.notes.clone(),
            updated.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print an import conflict side by side, passwords masked.
pub fn print_conflict(existing: &CredentialEntry, incoming: &CredentialRecord) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Existing", "Incoming"]);

    let e = &existing.record;
    table.add_row(vec!["Website", e.website.as_str(), incoming.website.as_str()]);
    table.add_row(vec!["Username", e.username.as_str(), incoming.username.as_str()]);
    table.add_row(vec![
        "Password".to_string(),
        mask(&e.password),
        mask(&incoming.password),
    ]);
    table.add_row(vec!["Category", e.category.as_str(), incoming.category.as_str()]);
    table.add_row(vec!["URL", e.url.as_str(), incoming.url.as_str()]);
    table.add_row(vec!["Notes", e.notes.as_str(), incoming.notes.as_str()]);

    println!("{table}");
}
