//! Transcription module for acta
//!
//! Handles speech-to-text using whisper-rs.

mod whisper;

use anyhow::Result;

pub use whisper::{load_audio, WhisperTranscriber};

/// Speech-to-text engine seam.
///
/// The server holds the engine behind this trait so tests can substitute a
/// stub without a model file on disk.
pub trait SpeechToText: Send + Sync {
    /// Transcribe 16 kHz mono samples into plain text.
    ///
    /// Silent or empty audio yields the empty string.
    fn transcribe(&self, samples: &[f32]) -> Result<String>;
}
