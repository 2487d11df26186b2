//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::{default_data_dir, Settings};
use crate::errors::{Result, SecretBookError};
use crate::vault::{AccountStore, CredentialRepository};

/// Environment variable consulted for the login secret.
const PASSWORD_ENV: &str = "SECRETBOOK_PASSWORD";

/// SecretBook CLI: encrypted per-account credential book.
#[derive(Parser)]
#[command(
    name = "secretbook",
    about = "Encrypted per-account credential book",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: ~/.secretbook)
    #[arg(long, env = "SECRETBOOK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Account to log in as (default: `default_account` from settings)
    #[arg(short, long, env = "SECRETBOOK_ACCOUNT", global = true)]
    pub account: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new account
    Register,

    /// List credentials
    List {
        /// Only show entries whose website, username, notes or category contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show entries in this category
        #[arg(short, long, conflicts_with = "uncategorized")]
        category: Option<String>,

        /// Only show entries without a category
        #[arg(long)]
        uncategorized: bool,

        /// Print passwords instead of masking them
        #[arg(long)]
        show: bool,
    },

    /// List the categories in use
    Categories,

    /// Add a credential
    Add {
        /// Website or application name
        website: String,
        /// Account name on that website
        username: String,
        /// Password (omit for interactive prompt)
        password: Option<String>,
        #[command(flatten)]
        details: DetailArgs,
        /// Update the existing entry without asking if this one is a duplicate
        #[arg(short, long)]
        yes: bool,
    },

    /// Edit a credential in place
    Edit {
        /// Credential id (see `list`)
        id: u64,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
        #[command(flatten)]
        details: DetailArgs,
        /// Save even if another entry has the same website and username
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential id
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print a credential's password
    Get {
        /// Credential id
        id: u64,
    },

    /// Copy a credential's password to the clipboard
    Copy {
        /// Credential id
        id: u64,
    },

    /// Export all credentials to an encrypted bundle
    Export {
        /// Destination file (e.g. backup.sbk)
        file: PathBuf,
    },

    /// Import credentials from an encrypted bundle
    Import {
        /// Bundle file written by `export`
        file: PathBuf,

        /// Delete all existing credentials before importing
        #[arg(long)]
        replace: bool,

        /// Overwrite every conflicting entry without asking
        #[arg(long, conflicts_with = "skip_all")]
        overwrite_all: bool,

        /// Keep every existing entry on conflict without asking
        #[arg(long)]
        skip_all: bool,

        /// Skip the confirmation prompt for --replace
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Optional credential fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct DetailArgs {
    /// Category (e.g. Work, Personal)
    #[arg(long)]
    pub category: Option<String>,
    /// Login URL
    #[arg(long)]
    pub url: Option<String>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the data directory from `--data-dir` or the default.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir(),
    }
}

/// Load settings and build a repository over the configured store.
pub fn open_repository(cli: &Cli) -> Result<(Settings, CredentialRepository)> {
    let dir = data_dir(cli)?;
    let settings = Settings::load(&dir)?;
    let store = AccountStore::new(settings.store_path(&dir));
    Ok((settings, CredentialRepository::new(store)))
}

/// Pick the account name from `--account` or the settings.
pub fn account_name(cli: &Cli, settings: &Settings) -> Result<String> {
    let name = cli
        .account
        .clone()
        .or_else(|| settings.default_account.clone())
        .ok_or_else(|| {
            SecretBookError::CommandFailed(
                "no account given: pass --account <NAME> or set default_account".into(),
            )
        })?;

    validate_account_name(&name)?;
    Ok(name)
}

/// Open the repository and log in, prompting for the secret if needed.
pub fn login(cli: &Cli) -> Result<CredentialRepository> {
    let (settings, mut repo) = open_repository(cli)?;
    let name = account_name(cli, &settings)?;
    let secret = prompt_password(&name)?;
    repo.login(&name, &secret)?;
    Ok(repo)
}

/// Get the login secret, trying in order:
/// 1. `SECRETBOOK_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn prompt_password(account: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for '{account}'"))
        .interact()
        .map_err(|e| SecretBookError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new login secret with confirmation (used by `register`).
///
/// Also respects `SECRETBOOK_PASSWORD` for scripted usage.
/// Enforces the configured minimum length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            if pw.chars().count() < min_len {
                return Err(SecretBookError::CommandFailed(format!(
                    "password must be at least {min_len} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose account password")
            .with_confirmation(
                "Confirm account password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| SecretBookError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SecretBookError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Validate that an account name is usable.
///
/// Must be non-empty after trimming, at most 128 characters, and free
/// of control characters.  Case is preserved and significant.
pub fn validate_account_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SecretBookError::CommandFailed(
            "account name cannot be empty".into(),
        ));
    }

    if name.chars().count() > 128 {
        return Err(SecretBookError::CommandFailed(
            "account name cannot exceed 128 characters".into(),
        ));
    }

    if name.chars().any(char::is_control) {
        return Err(SecretBookError::CommandFailed(format!(
            "account name '{}' contains control characters",
            name.escape_debug()
        )));
    }

    if name.trim() != name {
        return Err(SecretBookError::CommandFailed(format!(
            "account name '{name}' cannot start or end with whitespace"
        )));
    }

    Ok(())
}
