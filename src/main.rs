//! acta - audio transcription and meeting-minutes HTTP service
//!
//! Entry point for the acta binary.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use acta::cli::{Cli, Commands};
use acta::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            acta::cli::completions::print(shell);
        }
        Commands::Scaffold { dir, force } => {
            // Scaffolding is an explicit one-time step; it must not depend on
            // a loadable config or a reachable model.
            acta::cli::commands::scaffold_project(dir, force)?;
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Commands::Serve { host, port } => {
                    acta::cli::commands::serve(&settings, host, port).await?;
                }
                Commands::Config(config_cmd) => {
                    acta::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Scaffold { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
