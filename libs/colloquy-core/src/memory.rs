use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

pub const MIN_IMPORTANCE: i64 = 1;
pub const MAX_IMPORTANCE: i64 = 10;
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// Something the agent knows, with where it came from and how much it matters.
///
/// Deserialized records go through the same importance check as [`Memory::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MemoryRecord")]
pub struct Memory {
    id: String,
    content: String,
    source: String,
    importance: u8,
    created_at: DateTime<Utc>,
    last_accessed: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct MemoryRecord {
    id: String,
    content: String,
    source: String,
    importance: i64,
    created_at: DateTime<Utc>,
    #[serde(default)]
    last_accessed: Option<DateTime<Utc>>,
}

impl TryFrom<MemoryRecord> for Memory {
    type Error = CoreError;

    fn try_from(record: MemoryRecord) -> Result<Self> {
        Ok(Self {
            id: record.id,
            content: record.content,
            source: record.source,
            importance: checked_importance(record.importance)?,
            created_at: record.created_at,
            last_accessed: record.last_accessed,
        })
    }
}

fn checked_importance(importance: i64) -> Result<u8> {
    if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&importance) {
        return Err(CoreError::InvalidImportance(importance));
    }
    Ok(importance as u8)
}

impl Memory {
    /// Builds a memory with a fresh id. Importance outside `1..=10` is an error.
    pub fn new(
        content: impl Into<String>,
        source: impl Into<String>,
        importance: i64,
    ) -> Result<Self> {
        let importance = checked_importance(importance)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            source: source.into(),
            importance,
            created_at: Utc::now(),
            last_accessed: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn importance(&self) -> u8 {
        self.importance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_accessed(&self) -> Option<DateTime<Utc>> {
        self.last_accessed
    }
}
