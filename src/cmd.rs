//! Command implementations for the CLI interface.
//!
//! Every handler takes the `Store` it works against and the writer its
//! result lines go to. Expected failures come back as `TaskError`, whose
//! `Display` is the message shown to the user.

use std::io::Write;

use chrono::Local;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::*;
use crate::error::{Result, TaskError};
use crate::fields::{Status, UnknownStatus};
use crate::task::{Task, MAX_DESCRIPTION_LEN};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Task description. Multiple words are joined with spaces.
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// List tasks, optionally only those with one status.
    List {
        /// Status filter: todo | in-progress | done.
        status: Option<String>,
    },

    /// Replace the description of a task.
    Update {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
        /// New description. Multiple words are joined with spaces.
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Mark a task in progress.
    MarkInProgress {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Mark a task done.
    MarkDone {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

/// Run one command against the store.
pub fn dispatch(command: Commands, store: &Store, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Add { description } => cmd_add(store, out, &description),
        Commands::List { status } => cmd_list(store, out, status.as_deref()),
        Commands::Update { id, description } => {
            cmd_update(store, out, id.as_deref(), &description)
        }
        Commands::Delete { id } => cmd_delete(store, out, id.as_deref()),
        Commands::MarkInProgress { id } => {
            cmd_set_status(store, out, id.as_deref(), Status::InProgress, "mark-in-progress")
        }
        Commands::MarkDone { id } => cmd_set_status(store, out, id.as_deref(), Status::Done, "mark-done"),
        Commands::Completions { shell } => cmd_completions(shell, out),
        Commands::Unknown(args) => {
            let name = args.first().map(|a| a.to_lowercase()).unwrap_or_default();
            writeln!(out, "Unknown command: {name}")?;
            Ok(())
        }
    }
}

/// Add a new task.
pub fn cmd_add(store: &Store, out: &mut impl Write, words: &[String]) -> Result<()> {
    if words.is_empty() {
        return Err(TaskError::Usage("Usage: task-cli add \"task description\"".into()));
    }
    let description = validate_description(words)?;

    let mut db = store.load()?;
    let id = db.next_id();
    db.tasks.push(Task::new(id, description, Local::now()));
    store.save(&db)?;
    tracing::info!(id, "added task");
    writeln!(out, "Task added successfully (ID: {id})")?;
    Ok(())
}

/// List all tasks, or only those with the given status.
pub fn cmd_list(store: &Store, out: &mut impl Write, filter: Option<&str>) -> Result<()> {
    let filter = filter
        .map(|raw| {
            raw.parse::<Status>()
                .map_err(|UnknownStatus(raw)| TaskError::InvalidStatus(raw))
        })
        .transpose()?;

    let db = store.load()?;
    let tasks: Vec<&Task> = db
        .tasks
        .iter()
        .filter(|t| filter.map_or(true, |s| t.status == s))
        .collect();
    let title = match filter {
        Some(s) => format!("Tasks ({s}):"),
        None => "All tasks:".to_string(),
    };
    print_tasks(out, &tasks, &title)?;
    Ok(())
}

/// Replace a task's description.
pub fn cmd_update(
    store: &Store,
    out: &mut impl Write,
    id: Option<&str>,
    words: &[String],
) -> Result<()> {
    let Some(id) = id.filter(|_| !words.is_empty()) else {
        return Err(TaskError::Usage(
            "Usage: task-cli update [id] \"new description\"".into(),
        ));
    };
    let arg = parse_id(id)?;
    let description = validate_description(words)?;

    let mut db = store.load()?;
    let Some(t) = arg.id.and_then(|id| db.get_mut(id)) else {
        return Err(TaskError::NotFound(arg.text));
    };
    let task_id = t.id;
    t.set_description(description, Local::now());
    store.save(&db)?;
    tracing::info!(id = task_id, "updated task");
    writeln!(out, "Task {task_id} updated successfully")?;
    Ok(())
}

/// Delete a task.
pub fn cmd_delete(store: &Store, out: &mut impl Write, id: Option<&str>) -> Result<()> {
    let Some(id) = id else {
        return Err(TaskError::Usage("Usage: task-cli delete [id]".into()));
    };
    let arg = parse_id(id)?;

    let mut db = store.load()?;
    let Some(task_id) = arg.id.and_then(|id| db.remove(id)).map(|t| t.id) else {
        return Err(TaskError::NotFound(arg.text));
    };
    store.save(&db)?;
    tracing::info!(id = task_id, "deleted task");
    writeln!(out, "Task {task_id} deleted successfully")?;
    Ok(())
}

/// Move a task to `status`. `command` names the subcommand in the usage line.
pub fn cmd_set_status(
    store: &Store,
    out: &mut impl Write,
    id: Option<&str>,
    status: Status,
    command: &str,
) -> Result<()> {
    let Some(id) = id else {
        return Err(TaskError::Usage(format!("Usage: task-cli {command} [id]")));
    };
    let arg = parse_id(id)?;

    let mut db = store.load()?;
    let Some(t) = arg.id.and_then(|id| db.get_mut(id)) else {
        return Err(TaskError::NotFound(arg.text));
    };
    let task_id = t.id;
    t.set_status(status, Local::now());
    store.save(&db)?;
    tracing::info!(id = task_id, %status, "changed task status");
    writeln!(out, "Task {task_id} marked as {status}")?;
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell, out: &mut impl Write) -> Result<()> {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, out);
    Ok(())
}

/// Join description words and check the length rules.
pub fn validate_description(words: &[String]) -> Result<String> {
    let description = words.join(" ").trim().to_string();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(TaskError::DescriptionTooLong);
    }
    Ok(description)
}

/// A well-formed integer ID argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdArg {
    /// `None` when no task can carry this ID (negative, or past `u64::MAX`).
    pub id: Option<u64>,
    /// Normalized spelling used in not-found messages.
    pub text: String,
}

/// Parse a task ID argument: optional sign, then ASCII digits.
///
/// Anything else is `InvalidId`. Integers of any size are accepted so that
/// ones no task can have are reported as not found.
pub fn parse_id(raw: &str) -> Result<IdArg> {
    let s = raw.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaskError::InvalidId(raw.to_string()));
    }
    let magnitude = match digits.trim_start_matches('0') {
        "" => "0",
        m => m,
    };
    if negative && magnitude != "0" {
        return Ok(IdArg {
            id: None,
            text: format!("-{magnitude}"),
        });
    }
    Ok(IdArg {
        id: magnitude.parse::<u64>().ok(),
        text: magnitude.to_string(),
    })
}
