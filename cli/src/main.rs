//! tecli - Terraform Cloud command-line client
//!
//! Keeps named credential profiles in a per-user configuration directory and
//! forwards workspace operations to the Terraform Cloud API using the
//! selected profile's team token.

mod cli;
mod client;
mod config;
mod error;
mod input;
mod profile;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::settings::env;
use crate::config::AppInfo;
use crate::error::Result;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::LOG_LEVEL)
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Run the command
    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Completions { shell } => cli::commands::handle_completions(*shell),
        Commands::Configure {
            action,
            mode,
            flags,
        } => {
            let app = resolve_app(cli)?;
            cli::commands::handle_configure(&app, &cli.profile, *action, *mode, flags)
        }
        Commands::Workspace { operation, args } => {
            let app = resolve_app(cli)?;
            cli::commands::handle_workspace(&app, &cli.profile, *operation, args).await
        }
    }
}

fn resolve_app(cli: &Cli) -> Result<AppInfo> {
    let app = AppInfo::resolve(cli.config.as_deref())?;
    tracing::debug!(dir = %app.configurations_dir.display(), profile = %cli.profile, "resolved configuration");
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completions_dispatch_without_configuration() {
        let cli = Cli::parse_from(["tecli", "completions", "zsh"]);
        assert!(run(&cli).await.is_ok());
    }
}
