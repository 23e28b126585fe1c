//! # task-cli
//!
//! A small command-line task tracker. Tasks live in a single JSON file
//! (`./tasks.json` unless `--db` says otherwise) that is read in full at the
//! start of every command and written back in full after any change.
//!
//! ## Quick Start
//!
//! ```bash
//! task-cli add "Buy groceries"
//! task-cli list
//! task-cli mark-in-progress 1
//! task-cli mark-done 1
//! task-cli list done
//! task-cli update 1 "Buy groceries and cook dinner"
//! task-cli delete 1
//! ```
//!
//! Every failure is reported as a message and the process still exits
//! normally. Set `RUST_LOG=debug` to see what the store is doing.

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod colors;
pub mod db;
pub mod error;
pub mod fields;
pub mod task;

use cli::Cli;
use cmd::dispatch;
use db::Store;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            // Help, version and bad arguments all end here; none are fatal.
            let _ = e.print();
            return;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(command) = cli.command else {
        let _ = writeln!(out, "Usage: task-cli [command] [options]");
        return;
    };

    let store = Store::new(cli.db);
    tracing::debug!(path = %store.path().display(), "using task file");
    if let Err(e) = dispatch(command, &store, &mut out) {
        tracing::debug!(error = ?e, "command failed");
        let _ = out.flush();
        eprintln!("{e}");
    }
}
