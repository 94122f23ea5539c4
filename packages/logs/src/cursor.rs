// ABOUTME: Tail cursor: last seen timestamp plus the ids already emitted at that timestamp

use std::collections::HashSet;

use crate::types::LogRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCursor {
    last_timestamp_ms: i64,
    seen_at_last: HashSet<String>,
}

impl LogCursor {
    pub fn new(start_ms: i64) -> Self {
        Self {
            last_timestamp_ms: start_ms,
            seen_at_last: HashSet::new(),
        }
    }

    /// Next query start (inclusive)
    pub fn last_timestamp_ms(&self) -> i64 {
        self.last_timestamp_ms
    }

    pub fn seen_ids(&self) -> &HashSet<String> {
        &self.seen_at_last
    }

    /// Record `record` and return whether it should be emitted
    pub fn observe(&mut self, record: &LogRecord) -> bool {
        if self.seen_at_last.contains(&record.id) {
            return false;
        }

        if record.timestamp_ms > self.last_timestamp_ms {
            self.last_timestamp_ms = record.timestamp_ms;
            self.seen_at_last.clear();
            self.seen_at_last.insert(record.id.clone());
        } else if record.timestamp_ms == self.last_timestamp_ms {
            self.seen_at_last.insert(record.id.clone());
        }

        true
    }
}
