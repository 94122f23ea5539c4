// ABOUTME: Log record and log target types
// ABOUTME: Records carry the source-assigned id used for duplicate suppression

use chrono::{DateTime, Utc};

/// One log event as returned by the log source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Source-assigned id, unique within the log group
    pub id: String,
    pub stream_name: String,
    /// Event time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub ingestion_time_ms: Option<i64>,
    pub message: String,
}

impl LogRecord {
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_ms).unwrap_or_default()
    }
}

/// Which log group (and optionally which streams) to query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub group: String,
    pub stream_prefix: Option<String>,
}

impl LogTarget {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            stream_prefix: None,
        }
    }

    pub fn with_stream_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.stream_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }
}
