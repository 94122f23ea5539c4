use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use berth_cli::logging::init_logging;
use berth_cli::session::{available_profiles, profile_from_flag_or_env};
use berth_cli::Session;
use cli::logs::LogsArgs;
use cli::shell::ShellArgs;
use cli::sso::SsoCommands;

#[derive(Parser)]
#[command(name = "berth")]
#[command(about = "Berth - AWS SSO sign-in, ECS log tailing and container shells")]
#[command(version)]
struct Cli {
    /// AWS profile to use (defaults to AWS_PROFILE, otherwise prompts)
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Log level used when BERTH_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with IAM Identity Center and manage SSO credentials
    #[command(subcommand)]
    Sso(SsoCommands),
    /// Show or follow the logs of an ECS container
    Logs(LogsArgs),
    /// Open an interactive shell in an ECS container
    Shell(ShellArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = handle_command(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let profile = match profile_from_flag_or_env(cli.profile.as_deref()) {
        Some(profile) => profile,
        None => cli::select::select_one("Select a profile", available_profiles()?)?,
    };

    let session = Session::open(&profile).await?;

    match cli.command {
        Commands::Sso(command) => cli::sso::handle_sso_command(command, &session).await,
        Commands::Logs(args) => cli::logs::handle_logs_command(args, &session).await,
        Commands::Shell(args) => cli::shell::handle_shell_command(args, &session).await,
    }
}
