//! Task data structure.
//!
//! A `Task` is a single trackable unit of work. It is stored with camelCase
//! keys and ISO-8601 timestamps so the JSON file stays readable by hand.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::fields::Status;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// A work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: Status,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Local>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Local>,
}

impl Task {
    /// Create a new `todo` task; both timestamps are `now`.
    pub fn new(id: u64, description: String, now: DateTime<Local>) -> Self {
        Task {
            id,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change status and refresh `updated_at`.
    pub fn set_status(&mut self, status: Status, now: DateTime<Local>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Replace the description and refresh `updated_at`.
    pub fn set_description(&mut self, description: String, now: DateTime<Local>) {
        self.description = description;
        self.updated_at = now;
    }
}

/// Timestamps are written as RFC 3339. On read, naive ISO-8601 values
/// without an offset are accepted too and taken as local time.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(d)?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(ts.with_timezone(&Local));
        }
        let naive = raw
            .parse::<NaiveDateTime>()
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{raw}': {e}")))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| de::Error::custom(format!("nonexistent local time '{raw}'")))
    }
}
