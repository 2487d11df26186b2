//! `secretbook completions`: print a shell completion script.
//!
//! The shell name is parsed by clap (`clap_complete::Shell` is a
//! `ValueEnum`), so unknown shells are rejected before this runs.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Binary name the generated script completes for.
const BIN_NAME: &str = env!("CARGO_PKG_NAME");

/// Execute the `completions` command, writing to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    render(shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write the completion script for `shell` into `out`.
pub fn render(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut command = Cli::command();
    let mut script = Vec::new();
    clap_complete::generate(shell, &mut command, BIN_NAME, &mut script);
    out.write_all(&script)?;
    Ok(())
}
