// ABOUTME: Log tail engine built on repeated point queries
// ABOUTME: Drains a query per tick, suppresses boundary duplicates and sleeps between ticks until cancelled

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::{
    cursor::LogCursor,
    error::LogResult,
    source::LogSource,
    types::{LogRecord, LogTarget},
};

/// Pause between tail ticks
pub const DEFAULT_TAIL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct TailEngine {
    source: Arc<dyn LogSource>,
    interval: Duration,
}

impl TailEngine {
    pub fn new(source: Arc<dyn LogSource>) -> Self {
        Self {
            source,
            interval: DEFAULT_TAIL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one tick: a full drain from the cursor, emitting unseen records in order
    ///
    /// Returns how many records were emitted.
    pub async fn tick<F>(
        &self,
        target: &LogTarget,
        cursor: &mut LogCursor,
        on_record: &mut F,
    ) -> LogResult<usize>
    where
        F: FnMut(&LogRecord),
    {
        let records = self
            .source
            .query(target, cursor.last_timestamp_ms())
            .await?;

        let mut emitted = 0;
        for record in &records {
            if cursor.observe(record) {
                on_record(record);
                emitted += 1;
            }
        }

        debug!(
            "Tail tick returned {} records, emitted {}, cursor at {}",
            records.len(),
            emitted,
            cursor.last_timestamp_ms()
        );
        Ok(emitted)
    }

    /// Single drain from `start_ms`, no following
    pub async fn drain_once<F>(
        &self,
        target: &LogTarget,
        start_ms: i64,
        mut on_record: F,
    ) -> LogResult<LogCursor>
    where
        F: FnMut(&LogRecord),
    {
        let mut cursor = LogCursor::new(start_ms);
        self.tick(target, &mut cursor, &mut on_record).await?;
        Ok(cursor)
    }

    /// Tail from `start_ms` until `cancel` resolves or a query fails
    ///
    /// Cancellation is honored between ticks; a drain in progress completes first.
    pub async fn follow<F, C>(
        &self,
        target: &LogTarget,
        start_ms: i64,
        mut on_record: F,
        cancel: C,
    ) -> LogResult<LogCursor>
    where
        F: FnMut(&LogRecord),
        C: Future<Output = ()>,
    {
        tokio::pin!(cancel);
        let mut cursor = LogCursor::new(start_ms);

        loop {
            self.tick(target, &mut cursor, &mut on_record).await?;

            tokio::select! {
                _ = &mut cancel => {
                    debug!("Tail cancelled at {}", cursor.last_timestamp_ms());
                    return Ok(cursor);
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
