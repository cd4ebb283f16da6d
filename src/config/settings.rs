//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Whisper transcription settings
    #[serde(default)]
    pub whisper: WhisperSettings,

    /// Completion API settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Minutes generation settings
    #[serde(default)]
    pub minutes: MinutesSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for models, uploads, and generated documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSettings {
    /// Whisper model to use (tiny, base, small, medium, large)
    #[serde(default = "default_model")]
    pub model: String,

    /// Path to model files directory
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Language for transcription (empty = auto-detect)
    #[serde(default)]
    pub language: String,

    /// Enable translation to English
    #[serde(default)]
    pub translate: bool,

    /// Number of threads for inference (0 = auto)
    #[serde(default)]
    pub threads: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI API key (usually supplied via OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// Completion model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Maximum tokens generated per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// API endpoint (overridable for tests and proxies)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinutesSettings {
    /// Directory where generated PDF documents are written
    #[serde(default = "default_minutes_dir")]
    pub output_dir: PathBuf,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "acta", "acta")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/acta"))
}

fn default_models_dir() -> PathBuf {
    let mut dir = default_data_dir();
    dir.push("models");
    dir
}

fn default_minutes_dir() -> PathBuf {
    let mut dir = default_data_dir();
    dir.push("minutes");
    dir
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    64 * 1024 * 1024
}

fn default_model() -> String {
    "small".to_string()
}

fn default_llm_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            models_dir: default_models_dir(),
            language: String::new(),
            translate: false,
            threads: 0,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            endpoint: String::new(),
        }
    }
}

impl Default for MinutesSettings {
    fn default() -> Self {
        Self {
            output_dir: default_minutes_dir(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            whisper: WhisperSettings::default(),
            llm: LlmSettings::default(),
            minutes: MinutesSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        load_environment_file();

        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                self.llm.api_key = key;
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "acta", "acta")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory for transient uploaded audio files
    pub fn upload_dir(&self) -> PathBuf {
        self.general.data_dir.join("uploads")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.general.data_dir)?;
        std::fs::create_dir_all(self.upload_dir())?;
        std::fs::create_dir_all(&self.minutes.output_dir)?;
        std::fs::create_dir_all(&self.whisper.models_dir)?;
        Ok(())
    }

    /// Get the path to a whisper model file
    pub fn model_path(&self) -> PathBuf {
        self.whisper
            .models_dir
            .join(format!("ggml-{}.bin", self.whisper.model))
    }
}

/// Load the secrets file selected by the ENVIRONMENT variable.
///
/// Missing files are not an error; a bare environment is a valid way to run
/// the service when OPENAI_API_KEY is set directly.
fn load_environment_file() {
    let environment =
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", environment);

    match dotenvy::from_filename(&env_file) {
        Ok(_) => tracing::info!("Loaded environment from {}", env_file),
        Err(_) => tracing::debug!("No {} file found", env_file),
    }
}
