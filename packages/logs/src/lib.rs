// ABOUTME: Berth log library for CloudWatch Logs
// ABOUTME: Paginated log queries plus a tail engine that turns repeated queries into an ordered, duplicate-free stream

pub mod cursor;
pub mod error;
pub mod source;
pub mod tail;
pub mod types;

// Re-export main types
pub use cursor::LogCursor;
pub use error::{LogError, LogResult};
pub use source::{CloudWatchLogSource, LogSource};
pub use tail::{TailEngine, DEFAULT_TAIL_INTERVAL};
pub use types::{LogRecord, LogTarget};
