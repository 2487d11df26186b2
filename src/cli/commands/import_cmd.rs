//! `secretbook import`: merge or replace credentials from a bundle.
//!
//! Conflicting entries are walked one by one with a four-way prompt
//! (overwrite, skip, overwrite all, skip all) unless `--overwrite-all` or
//! `--skip-all` settles them up front.

use std::path::Path;

use dialoguer::Select;

use crate::cli::output;
use crate::cli::{confirm, login, Cli};
use crate::errors::{Result, SecretBookError};
use crate::transfer::{import_bundle, resolve_conflicts, Conflict, ExportBundle, ImportMode, Resolution};

/// Flags controlling an import.
pub struct ImportArgs {
    pub replace: bool,
    pub overwrite_all: bool,
    pub skip_all: bool,
    pub force: bool,
}

/// Execute the `import` command.
pub fn execute(cli: &Cli, source: &Path, args: &ImportArgs) -> Result<()> {
    if !source.exists() {
        return Err(SecretBookError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let repo = login(cli)?;
    let bundle = ExportBundle::read(source)?;

    let mode = if args.replace {
        if !args.force && !confirm("Replace mode deletes ALL existing credentials. Continue?")? {
            return Err(SecretBookError::UserCancelled);
        }
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let report = import_bundle(&repo, &bundle, mode)?;
    output::success(&format!(
        "Imported {} credential(s) from {}",
        report.imported_count,
        source.display()
    ));

    if report.conflicts.is_empty() {
        return Ok(());
    }

    output::warning(&format!(
        "{} incoming credential(s) already exist",
        report.conflicts.len()
    ));

    let overwritten = if args.overwrite_all {
        resolve_conflicts(&repo, &report.conflicts, |_, _, _| Ok(Resolution::OverwriteAll))?
    } else if args.skip_all {
        resolve_conflicts(&repo, &report.conflicts, |_, _, _| Ok(Resolution::SkipAll))?
    } else {
        resolve_conflicts(&repo, &report.conflicts, ask)?
    };

    output::info(&format!(
        "Overwrote {overwritten}, kept {} existing",
        report.conflicts.len() - overwritten
    ));

    Ok(())
}

/// Interactive conflict prompt.
fn ask(conflict: &Conflict, index: usize, total: usize) -> Result<Resolution> {
    println!();
    output::info(&format!("Conflict {}/{}", index + 1, total));
    output::print_conflict(&conflict.existing, &conflict.incoming);

    const CHOICES: [(&str, Resolution); 4] = [
        ("Keep existing", Resolution::Skip),
        ("Overwrite with incoming", Resolution::Overwrite),
        ("Overwrite this and all remaining", Resolution::OverwriteAll),
        ("Keep existing for this and all remaining", Resolution::SkipAll),
    ];

    let labels: Vec<&str> = CHOICES.iter().map(|(label, _)| *label).collect();
    let picked = Select::new()
        .with_prompt("What should happen to this entry?")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| SecretBookError::CommandFailed(format!("conflict prompt: {e}")))?;

    Ok(CHOICES[picked].1)
}
