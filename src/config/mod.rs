//! Configuration module for acta
//!
//! Handles loading and managing application settings from TOML files and
//! per-environment secrets files.

mod settings;

pub use settings::Settings;
