//! Error types for the store and the command handlers.

use std::io;
use std::path::PathBuf;

use crate::task::MAX_DESCRIPTION_LEN;

/// Failures while reading or writing the task file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything a command can report back to the user.
///
/// The `Display` text is the exact line printed for the failure.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Usage(String),

    #[error("Error: Task description cannot be empty")]
    EmptyDescription,

    #[error("Error: Task description is too long (max {} characters)", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,

    #[error("Error: ID must be a number")]
    InvalidId(String),

    #[error("Invalid status filter. Use one of: todo, in-progress, done")]
    InvalidStatus(String),

    /// Carries the ID as the user wrote it, normalized.
    #[error("Task with ID {0} not found")]
    NotFound(String),

    #[error("Error: {0}")]
    Store(#[from] StoreError),

    #[error("Error writing output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
