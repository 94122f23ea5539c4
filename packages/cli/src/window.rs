// ABOUTME: Start of the look-back window for log reads

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{CliError, CliResult};

/// Epoch milliseconds `hours` before `now`
pub fn lookback_start_ms(now: DateTime<Utc>, hours: u32) -> CliResult<i64> {
    TimeDelta::try_hours(i64::from(hours))
        .and_then(|window| now.checked_sub_signed(window))
        .map(|start| start.timestamp_millis())
        .ok_or(CliError::LookbackOutOfRange { hours })
}
