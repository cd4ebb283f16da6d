//! CLI command implementations

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::build_provider;
use crate::server::AppState;
use crate::transcription::WhisperTranscriber;

/// Run the HTTP service until interrupted.
pub async fn serve(settings: &Settings, host: Option<String>, port: Option<u16>) -> Result<()> {
    settings.ensure_dirs()?;

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    // The model and the completion client are constructed once here and
    // shared read-only with every request handler.
    tracing::info!(model = %settings.whisper.model, "Loading Whisper model...");
    let transcriber = WhisperTranscriber::new(settings)?;
    tracing::info!("Whisper model loaded");

    let provider = build_provider(settings)?;

    let state = AppState::new(Arc::new(transcriber), provider, settings.clone());
    crate::server::serve(&host, port, state).await
}

/// Write deployment artifacts into the target directory.
pub fn scaffold_project(dir: Option<PathBuf>, force: bool) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let written = crate::scaffold::write_artifacts(&dir, force)?;

    if written.is_empty() {
        println!("All artifacts already present in {}", dir.display());
    } else {
        for file in written {
            println!("Wrote {}", file.display());
        }
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
