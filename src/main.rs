use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secretbook::cli::commands::edit::EditArgs;
use secretbook::cli::commands::import_cmd::ImportArgs;
use secretbook::cli::{Cli, Commands};
use secretbook::config::Settings;

/// Initialize logging.
///
/// `SECRETBOOK_LOG` wins; otherwise the settings' `log_filter` is used.
fn init_logging(cli: &Cli) {
    let fallback = secretbook::cli::data_dir(cli)
        .ok()
        .and_then(|dir| Settings::load(&dir).ok())
        .map_or_else(|| Settings::default().log_filter, |s| s.log_filter);

    let filter = EnvFilter::try_from_env("SECRETBOOK_LOG")
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Commands::Register => secretbook::cli::commands::register::execute(&cli),
        Commands::List {
            ref search,
            ref category,
            uncategorized,
            show,
        } => secretbook::cli::commands::list::execute(
            &cli,
            search.as_deref(),
            category.as_deref(),
            uncategorized,
            show,
        ),
        Commands::Categories => secretbook::cli::commands::list::execute_categories(&cli),
        Commands::Add {
            ref website,
            ref username,
            ref password,
            ref details,
            yes,
        } => secretbook::cli::commands::add::execute(
            &cli,
            website,
            username,
            password.as_deref(),
            details,
            yes,
        ),
        Commands::Edit {
            id,
            ref website,
            ref username,
            password,
            ref details,
            yes,
        } => {
            let args = EditArgs {
                website: website.as_deref(),
                username: username.as_deref(),
                prompt_password: password,
                details,
            };
            secretbook::cli::commands::edit::execute(&cli, id, &args, yes)
        }
        Commands::Delete { id, force } => {
            secretbook::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Get { id } => secretbook::cli::commands::get::execute(&cli, id),
        Commands::Copy { id } => secretbook::cli::commands::get::execute_copy(&cli, id),
        Commands::Export { ref file } => secretbook::cli::commands::export::execute(&cli, file),
        Commands::Import {
            ref file,
            replace,
            overwrite_all,
            skip_all,
            force,
        } => {
            let args = ImportArgs {
                replace,
                overwrite_all,
                skip_all,
                force,
            };
            secretbook::cli::commands::import_cmd::execute(&cli, file, &args)
        }
        Commands::Completions { shell } => {
            secretbook::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        secretbook::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
