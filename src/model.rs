use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{Result, TaskqError};

pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A pending unit of work. Immutable once added; the only transition it
/// undergoes is leaving the pending set on completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub priority: i64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Advisory only. Empty or unparseable stored values load as `None`
    /// rather than invalidating the snapshot.
    #[serde(default, deserialize_with = "lenient_deadline")]
    pub deadline: Option<NaiveDate>,
    /// Insertion counter used only to break priority ties. Not persisted;
    /// reconstructed from file order on load.
    #[serde(skip)]
    pub sequence: u64,
}

impl Task {
    /// Ordering key: lower priority first, then earlier insertion.
    pub fn key(&self) -> (i64, u64) {
        (self.priority, self.sequence)
    }
}

fn lenient_deadline<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT) {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            warn!(deadline = %raw, "ignoring unparseable deadline");
            Ok(None)
        }
    }
}

/// Validate a task name, returning it trimmed.
pub fn parse_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TaskqError::InvalidName);
    }
    Ok(trimmed.to_string())
}

pub fn parse_priority(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| TaskqError::InvalidPriority(input.to_string()))
}

pub fn parse_deadline(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DEADLINE_FORMAT)
        .map_err(|_| TaskqError::InvalidDeadline(input.to_string()))
}

/// Trim entries, drop empty ones and remove duplicates while keeping the
/// first occurrence of each name.
pub fn normalize_dependencies<I, S>(deps: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for dep in deps {
        let dep = dep.as_ref().trim();
        if !dep.is_empty() && !out.iter().any(|d| d == dep) {
            out.push(dep.to_string());
        }
    }
    out
}
