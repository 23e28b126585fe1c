//! Task file storage and display helpers.
//!
//! `Store` owns the path of the backing JSON file and moves the whole
//! collection in and out of it. `Database` is the in-memory collection that
//! the command handlers mutate between a load and a save.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::colors::styled_status;
use crate::error::StoreError;
use crate::task::Task;

/// Default backing file, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "tasks.json";

/// In-memory task collection, in insertion order.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove the task with this ID, keeping the order of the rest.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }
}

/// File-backed task store.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection.
    ///
    /// A missing file is created holding an empty collection. A file that
    /// doesn't parse is treated as empty; the parse error is only logged.
    pub fn load(&self) -> Result<Database, StoreError> {
        if !self.path.exists() {
            let db = Database::default();
            self.save(&db)?;
            tracing::debug!(path = %self.path.display(), "created empty task file");
            return Ok(db);
        }
        let buf = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        match serde_json::from_slice::<Database>(&buf) {
            Ok(db) => {
                tracing::debug!(path = %self.path.display(), count = db.tasks.len(), "loaded tasks");
                Ok(db)
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "unparseable task file, starting empty");
                Ok(Database::default())
            }
        }
    }

    /// Replace the file contents with `db` (temp file + rename).
    pub fn save(&self, db: &Database) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(db)?;
        let tmp = self.path.with_extension("json.tmp");
        self.write_file(&tmp, data.as_bytes())?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %self.path.display(), count = db.tasks.len(), "saved tasks");
        Ok(())
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), StoreError> {
        let write = || -> io::Result<()> {
            let mut f = File::create(path)?;
            f.write_all(data)?;
            f.flush()
        };
        write().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Print tasks under a title, one block per task.
pub fn print_tasks(out: &mut impl Write, tasks: &[&Task], title: &str) -> io::Result<()> {
    writeln!(out, "{title}")?;
    if tasks.is_empty() {
        writeln!(out, "  No tasks found")?;
        return Ok(());
    }
    for t in tasks {
        writeln!(out, "  ID: {}", t.id)?;
        writeln!(out, "  Description: {}", t.description)?;
        writeln!(out, "  Status: {}", styled_status(t.status))?;
        writeln!(out, "  Created: {}", format_timestamp(&t.created_at))?;
        writeln!(out, "  Updated: {}", format_timestamp(&t.updated_at))?;
        writeln!(out, "{}", "-".repeat(40))?;
    }
    Ok(())
}
