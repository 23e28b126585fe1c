use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::cmd::Commands;
use crate::db::DEFAULT_DB_FILE;

/// Simple, file-backed task tracker CLI.
/// Storage defaults to ./tasks.json or a path passed via --db.
#[derive(Debug, Parser)]
#[command(name = "task-cli", version, about = "Track tasks from the command line")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Lowercase the subcommand name in `args` when that names a known command,
/// so `ADD` and `Mark-Done` dispatch like `add` and `mark-done`.
///
/// The subcommand is the first token after the program name that is neither
/// a flag nor the value of `--db`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut i = 1;
    while i < args.len() {
        let Some(token) = args[i].to_str() else {
            return args;
        };
        if token == "--db" {
            i += 2;
            continue;
        }
        if token.starts_with('-') {
            i += 1;
            continue;
        }
        let lowered = token.to_lowercase();
        if lowered != token && is_subcommand(&lowered) {
            args[i] = lowered.into();
        }
        break;
    }
    args
}

fn is_subcommand(name: &str) -> bool {
    Cli::command().find_subcommand(name).is_some()
}
