// ABOUTME: CLI command opening an interactive shell in an ECS container
// ABOUTME: Delegates the session to `aws ecs execute-command` with inherited stdio

use anyhow::{bail, Context, Result};
use berth_cli::Session;
use berth_cloud::EcsClient;
use clap::Args;
use std::process::Command;
use tracing::debug;

use super::select::confirm;
use super::target::{resolve_target, TargetArgs};

#[derive(Args)]
pub struct ShellArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn handle_shell_command(args: ShellArgs, session: &Session) -> Result<()> {
    session.ensure_authenticated().await?;

    let ecs = EcsClient::new(session.sdk_config());
    let target = resolve_target(&ecs, &args.target).await?;

    // Fails early while the container is still starting
    let ssm_target = target.container.ssm_target()?;
    debug!("Session Manager target {}", ssm_target);

    println!(
        "cluster: {} service: {} container: {}",
        target.cluster, target.service, target.container.name
    );
    if !confirm("Connect to the above container?")? {
        return Ok(());
    }

    let status = Command::new("aws")
        .args([
            "ecs",
            "execute-command",
            "--profile",
            session.profile(),
            "--task",
            target.task_arn.as_str(),
            "--cluster",
            target.cluster.as_str(),
            "--container",
            target.container.name.as_str(),
            "--command",
            "/bin/bash",
            "--interactive",
        ])
        .status()
        .context("Failed to run the aws CLI; is it installed and on PATH?")?;

    if !status.success() {
        bail!("aws ecs execute-command exited with {}", status);
    }
    Ok(())
}
