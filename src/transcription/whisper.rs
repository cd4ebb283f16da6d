//! Whisper transcription using whisper-rs

use anyhow::{Context, Result};
use std::path::Path;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::Settings;
use crate::transcription::SpeechToText;

/// Whisper-based transcriber
///
/// The model is loaded once; each call builds its own decode state, so the
/// transcriber can be shared across concurrent requests.
pub struct WhisperTranscriber {
    ctx: WhisperContext,
    language: Option<String>,
    translate: bool,
    threads: u32,
}

impl WhisperTranscriber {
    /// Create a new transcriber with the model named in settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let model_path = settings.model_path();

        if !model_path.exists() {
            anyhow::bail!(
                "Whisper model not found at {}. Download a ggml model file first.",
                model_path.display()
            );
        }

        let model_path = model_path
            .to_str()
            .context("Model path is not valid UTF-8")?;

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .context("Failed to load Whisper model")?;

        let language = if settings.whisper.language.is_empty() {
            None
        } else {
            Some(settings.whisper.language.clone())
        };

        Ok(Self {
            ctx,
            language,
            translate: settings.whisper.translate,
            threads: settings.whisper.threads,
        })
    }
}

impl SpeechToText for WhisperTranscriber {
    fn transcribe(&self, samples: &[f32]) -> Result<String> {
        if samples.is_empty() {
            return Ok(String::new());
        }

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_translate(self.translate);

        if self.threads > 0 {
            params.set_n_threads(self.threads as i32);
        }

        if let Some(ref lang) = self.language {
            params.set_language(Some(lang));
        }

        let mut state = self
            .ctx
            .create_state()
            .context("Failed to create Whisper state")?;
        state
            .full(params, samples)
            .context("Whisper inference failed")?;

        let num_segments = state
            .full_n_segments()
            .context("Failed to get segment count")?;

        let mut texts = Vec::new();
        for i in 0..num_segments {
            let text = state
                .full_get_segment_text(i)
                .context("Failed to get segment text")?;

            let text = text.trim();
            if !text.is_empty() {
                texts.push(text.to_string());
            }
        }

        Ok(texts.join(" "))
    }
}

/// Load audio from a WAV file and convert to f32 samples at 16kHz mono
pub fn load_audio(path: &Path) -> Result<Vec<f32>> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels as usize;

    tracing::debug!(
        "Loading audio: {} Hz, {} channels, {:?}",
        sample_rate,
        channels,
        spec.sample_format
    );

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .filter_map(|s| s.ok())
            .map(|s| s as f32 / 32768.0)
            .collect(),
        (hound::SampleFormat::Int, 32) => reader
            .into_samples::<i32>()
            .filter_map(|s| s.ok())
            .map(|s| s as f32 / 2147483648.0)
            .collect(),
        (hound::SampleFormat::Float, 32) => {
            reader.into_samples::<f32>().filter_map(|s| s.ok()).collect()
        }
        _ => anyhow::bail!(
            "Unsupported audio format: {:?} {}bit",
            spec.sample_format,
            spec.bits_per_sample
        ),
    };

    // Convert to mono if stereo
    let samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    // Resample to 16kHz if needed
    let samples = if sample_rate != 16000 {
        resample(&samples, sample_rate, 16000)
    } else {
        samples
    };

    Ok(samples)
}

/// Simple linear resampling
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let ratio = from_rate as f64 / to_rate as f64;
    let new_len = (samples.len() as f64 / ratio) as usize;
    let mut result = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        let sample = if src_idx + 1 < samples.len() {
            samples[src_idx] * (1.0 - frac as f32) + samples[src_idx + 1] * frac as f32
        } else if src_idx < samples.len() {
            samples[src_idx]
        } else {
            0.0
        };

        result.push(sample);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_halves_sample_count_when_downsampling() {
        let samples: Vec<f32> = (0..320).map(|i| i as f32 / 320.0).collect();
        let resampled = resample(&samples, 32000, 16000);
        assert_eq!(resampled.len(), 160);
    }

    #[test]
    fn resample_is_identity_preserving_at_same_rate_lengths() {
        let samples = vec![0.5_f32; 160];
        let resampled = resample(&samples, 16000, 16000);
        assert_eq!(resampled.len(), samples.len());
    }

    #[test]
    fn load_audio_downmixes_stereo_wav() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("stereo.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
        for _ in 0..100 {
            writer.write_sample(8000_i16).expect("write sample");
            writer.write_sample(-8000_i16).expect("write sample");
        }
        writer.finalize().expect("finalize wav");

        let samples = load_audio(&path).expect("load audio");
        assert_eq!(samples.len(), 100);
        // Opposite-phase channels cancel out in the mono mix.
        assert!(samples.iter().all(|s| s.abs() < 1e-3));
    }

    #[test]
    fn load_audio_rejects_non_wav_bytes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("not-audio.wav");
        std::fs::write(&path, b"definitely not a riff header").expect("write file");

        assert!(load_audio(&path).is_err());
    }
}
