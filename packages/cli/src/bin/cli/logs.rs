// ABOUTME: CLI command for reading ECS container logs
// ABOUTME: Prints the last N hours once, or follows new records until Ctrl-C

use std::sync::Arc;

use anyhow::Result;
use berth_cli::output::format_record;
use berth_cli::window::lookback_start_ms;
use berth_cli::Session;
use berth_cloud::EcsClient;
use berth_logs::{CloudWatchLogSource, TailEngine};
use chrono::Utc;
use clap::Args;
use tracing::debug;

use super::target::{resolve_target, TargetArgs};

#[derive(Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Number of hours back to read logs from
    #[arg(short = 't', long, default_value_t = 1)]
    pub hours: u32,

    /// Keep polling for new log records
    #[arg(short, long)]
    pub follow: bool,
}

pub async fn handle_logs_command(args: LogsArgs, session: &Session) -> Result<()> {
    session.ensure_authenticated().await?;

    let ecs = EcsClient::new(session.sdk_config());
    let target = resolve_target(&ecs, &args.target).await?;
    let log_target = ecs.log_target(&target.container).await?;
    debug!(
        "Reading logs from {} (stream prefix {:?})",
        log_target.group, log_target.stream_prefix
    );

    let engine = TailEngine::new(Arc::new(CloudWatchLogSource::new(session.sdk_config())));
    let start_ms = lookback_start_ms(Utc::now(), args.hours)?;
    let print = |record: &berth_logs::LogRecord| println!("{}", format_record(record));

    if args.follow {
        engine
            .follow(&log_target, start_ms, print, async {
                let _ = tokio::signal::ctrl_c().await;
                println!("\nCaught ctrl+c, quit!");
            })
            .await?;
    } else {
        engine.drain_once(&log_target, start_ms, print).await?;
    }

    Ok(())
}
