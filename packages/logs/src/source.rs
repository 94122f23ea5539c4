// ABOUTME: Log query client abstraction and its CloudWatch Logs implementation
// ABOUTME: Each query drains every page for the given start time before returning

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::{error::DisplayErrorContext, types::FilteredLogEvent, Client};
use tracing::debug;

use crate::{
    error::{LogError, LogResult},
    types::{LogRecord, LogTarget},
};

/// Point-in-time log query; no server-side follow is assumed
#[async_trait]
pub trait LogSource: Send + Sync {
    /// All records at or after `start_ms`, in source order, with pagination fully drained
    async fn query(&self, target: &LogTarget, start_ms: i64) -> LogResult<Vec<LogRecord>>;
}

#[derive(Debug, Clone)]
pub struct CloudWatchLogSource {
    client: Client,
}

impl CloudWatchLogSource {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogSource for CloudWatchLogSource {
    async fn query(&self, target: &LogTarget, start_ms: i64) -> LogResult<Vec<LogRecord>> {
        if target.group.is_empty() {
            return Err(LogError::InvalidTarget("log group name is empty".to_string()));
        }

        let mut pages = self
            .client
            .filter_log_events()
            .log_group_name(&target.group)
            .set_log_stream_name_prefix(target.stream_prefix.clone())
            .start_time(start_ms)
            .into_paginator()
            .send();

        let mut records = Vec::new();
        let mut page_count = 0usize;
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| LogError::Query(DisplayErrorContext(&e).to_string()))?;
            page_count += 1;
            records.extend(page.events().iter().map(to_record));
        }

        debug!(
            "Fetched {} log records from {} in {} pages",
            records.len(),
            target.group,
            page_count
        );
        Ok(records)
    }
}

fn to_record(event: &FilteredLogEvent) -> LogRecord {
    LogRecord {
        id: event.event_id().unwrap_or_default().to_string(),
        stream_name: event.log_stream_name().unwrap_or_default().to_string(),
        timestamp_ms: event.timestamp().unwrap_or_default(),
        ingestion_time_ms: event.ingestion_time(),
        message: event.message().unwrap_or_default().to_string(),
    }
}
