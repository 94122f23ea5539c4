// ABOUTME: Tracing subscriber setup for the berth binary
// ABOUTME: BERTH_LOG overrides the --log-level flag; diagnostics go to stderr

use berth_config::constants::BERTH_LOG;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber; later calls are no-ops
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(BERTH_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
