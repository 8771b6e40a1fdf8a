//! Bookkeeping threaded through a query chain: tool-call tracing, auto-compact
//! extraction state, and the file-read/write cache used for staleness checks.

use serde::Deserialize;
use serde::Serialize;
use std::time::SystemTime;

/// Identifies a single query within a chain of retries/fallbacks, and how
/// deep it is relative to the chain's root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTracking {
    pub chain_id: String,
    pub depth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_query_id: Option<String>,
}

impl QueryTracking {
    pub fn new_root(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            depth: 0,
            parent_query_id: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    pub fn child(&self, parent_query_id: impl Into<String>) -> Self {
        Self {
            chain_id: self.chain_id.clone(),
            depth: self.depth + 1,
            parent_query_id: Some(parent_query_id.into()),
        }
    }
}

/// Tracks session-memory auto-compaction state: how many tool calls/tokens
/// have accrued since the last extraction, and whether one is in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoCompactTracking {
    pub compacted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_id: Option<String>,
    pub turn_counter: u64,
    pub tool_call_count: u64,
    pub extraction_count: u64,
    pub extraction_in_progress: bool,
    pub last_extraction_tokens: u64,
    pub last_extraction_tool_calls: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_extraction_id: Option<String>,
}

impl AutoCompactTracking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_compacted(&mut self, turn_id: impl Into<String>, turn_counter: u64) {
        self.compacted = true;
        self.turn_id = Some(turn_id.into());
        self.turn_counter = turn_counter;
    }

    pub fn reset(&mut self) {
        self.compacted = false;
        self.turn_id = None;
        self.turn_counter = 0;
    }

    pub fn record_tool_call(&mut self) {
        self.tool_call_count += 1;
    }

    pub fn mark_extraction_started(&mut self) {
        self.extraction_in_progress = true;
    }

    pub fn mark_extraction_completed(&mut self, tokens: u64, extraction_id: impl Into<String>) {
        self.extraction_in_progress = false;
        self.extraction_count += 1;
        self.last_extraction_tokens = tokens;
        self.last_extraction_tool_calls = self.tool_call_count;
        self.last_extraction_id = Some(extraction_id.into());
    }

    pub fn mark_extraction_failed(&mut self) {
        self.extraction_in_progress = false;
    }

    pub fn tokens_since_extraction(&self, current_tokens: u64) -> u64 {
        current_tokens.saturating_sub(self.last_extraction_tokens)
    }

    pub fn tool_calls_since_extraction(&self) -> u64 {
        self.tool_call_count
            .saturating_sub(self.last_extraction_tool_calls)
    }
}

/// Cached read of a file, used to detect stale reads before an edit is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReadInfo {
    pub content: String,
    #[serde(with = "systemtime_secs")]
    pub mtime: SystemTime,
    pub access_count: u32,
    pub is_complete_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl FileReadInfo {
    pub fn new(content: impl Into<String>, mtime: SystemTime) -> Self {
        Self {
            content: content.into(),
            mtime,
            access_count: 1,
            is_complete_read: true,
            offset: None,
            limit: None,
        }
    }

    pub fn partial(content: impl Into<String>, mtime: SystemTime, offset: u64, limit: u64) -> Self {
        Self {
            content: content.into(),
            mtime,
            access_count: 1,
            is_complete_read: false,
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn record_access(&mut self) {
        self.access_count += 1;
    }
}

/// Kind of change detected on a tracked file since it was last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChangeType {
    Modified,
    Deleted,
    Created,
}

impl FileChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Created => "created",
        }
    }
}

/// A detected change to a file the session has previously read or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub change_type: FileChangeType,
}

impl FileChange {
    pub fn modified(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change_type: FileChangeType::Modified,
        }
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change_type: FileChangeType::Deleted,
        }
    }

    pub fn created(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change_type: FileChangeType::Created,
        }
    }
}

mod systemtime_secs {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use std::time::SystemTime;
    use std::time::UNIX_EPOCH;

    pub fn serialize<S: Serializer>(value: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = value
            .duration_since(UNIX_EPOCH)
            .map_err(serde::ser::Error::custom)?
            .as_secs_f64();
        serializer.serialize_f64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + std::time::Duration::from_secs_f64(secs))
    }
}

#[cfg(test)]
#[path = "tracking.test.rs"]
mod tests;
