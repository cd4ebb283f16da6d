//! acta - HTTP service for audio transcription and AI-generated meeting minutes
//!
//! "acta" is the Spanish word for the minutes of a meeting.

pub mod cli;
pub mod config;
pub mod llm;
pub mod pdf;
pub mod scaffold;
pub mod server;
pub mod transcription;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "acta";
