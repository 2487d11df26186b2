//! One module per subcommand; each exposes an `execute` entry point.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod get;
pub mod import_cmd;
pub mod list;
pub mod register;
