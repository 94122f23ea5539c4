// ABOUTME: CLI commands for IAM Identity Center sign-in
// ABOUTME: Login, logout, printing resolved credentials and rewriting env files

use anyhow::Result;
use berth_auth::AuthOutcome;
use berth_cli::env_file::update_env_file;
use berth_cli::output::CredentialsOutput;
use berth_cli::Session;
use clap::Subcommand;
use colored::*;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum SsoCommands {
    /// Register a new client and sign in through the browser
    Login,

    /// Sign out and delete the cached SSO token
    Logout,

    /// Print credentials for the selected profile
    Creds {
        /// Output as KEY="value" lines instead of JSON
        #[arg(short, long)]
        env: bool,
    },

    /// Replace AWS credential variables in env files (defaults to ./.env)
    Replace {
        /// Env files to update
        files: Vec<PathBuf>,
    },
}

pub async fn handle_sso_command(command: SsoCommands, session: &Session) -> Result<()> {
    match command {
        SsoCommands::Login => session.login().await?,
        SsoCommands::Logout => logout_command(session).await?,
        SsoCommands::Creds { env } => creds_command(session, env).await?,
        SsoCommands::Replace { files } => replace_command(session, files).await?,
    }
    Ok(())
}

async fn logout_command(session: &Session) -> Result<()> {
    let start_url = &session.tenant().start_url;
    if session.logout().await? {
        println!("{} Logged out of {}", "✓".green().bold(), start_url);
    } else {
        println!("No cached session for {}", start_url);
    }
    Ok(())
}

async fn credentials(session: &Session) -> Result<CredentialsOutput> {
    if session.ensure_authenticated().await? == AuthOutcome::Registered {
        eprintln!("{} Signed in as profile {}", "✓".green().bold(), session.profile());
    }
    let creds = session.credentials().await?;
    Ok(CredentialsOutput::from(&creds))
}

async fn creds_command(session: &Session, env: bool) -> Result<()> {
    let creds = credentials(session).await?;
    if env {
        print!("{}", creds.to_env());
    } else {
        println!("{}", creds.to_json()?);
    }
    Ok(())
}

async fn replace_command(session: &Session, files: Vec<PathBuf>) -> Result<()> {
    let creds = credentials(session).await?;

    let files = if files.is_empty() {
        vec![std::env::current_dir()?.join(".env")]
    } else {
        files
    };

    for path in &files {
        update_env_file(path, &creds)?;
        println!("{} Updated {}", "✓".green().bold(), path.display());
    }
    Ok(())
}
