#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::Arc;

use acta::config::Settings;
use acta::llm::build_provider;
use acta::server::{build_router, AppState};
use acta::transcription::SpeechToText;
use tempfile::TempDir;

/// Stub engine reporting the decoded sample count, so tests can tell
/// concurrent uploads apart without a model file on disk.
pub struct SampleCountTranscriber;

impl SpeechToText for SampleCountTranscriber {
    fn transcribe(&self, samples: &[f32]) -> anyhow::Result<String> {
        Ok(format!("{} samples", samples.len()))
    }
}

/// Stub engine with the silence contract: always the empty string.
pub struct SilentTranscriber;

impl SpeechToText for SilentTranscriber {
    fn transcribe(&self, _samples: &[f32]) -> anyhow::Result<String> {
        Ok(String::new())
    }
}

/// In-process server bound to an ephemeral port, with tempdir-backed
/// data and output directories.
pub struct TestServer {
    pub base_url: String,
    data_dir: TempDir,
    minutes_dir: TempDir,
}

impl TestServer {
    pub fn upload_dir(&self) -> PathBuf {
        self.data_dir.path().join("uploads")
    }

    pub fn minutes_dir(&self) -> PathBuf {
        self.minutes_dir.path().to_path_buf()
    }

    /// Entries currently present in the upload directory.
    pub fn upload_entries(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.upload_dir()) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Spawn the service with a stub transcriber and the given completion API
/// endpoint (usually a wiremock server's URI).
pub async fn spawn_server(transcriber: Arc<dyn SpeechToText>, llm_endpoint: &str) -> TestServer {
    let data_dir = tempfile::tempdir().expect("create data dir");
    let minutes_dir = tempfile::tempdir().expect("create minutes dir");

    let mut settings = Settings::default();
    settings.general.data_dir = data_dir.path().to_path_buf();
    settings.minutes.output_dir = minutes_dir.path().to_path_buf();
    settings.llm.api_key = "sk-test".to_string();
    settings.llm.endpoint = llm_endpoint.to_string();

    let provider = build_provider(&settings).expect("build LLM provider");
    let router = build_router(AppState::new(transcriber, provider, settings));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        data_dir,
        minutes_dir,
    }
}

/// Synthesize an in-memory mono 16 kHz WAV with the given sample count.
pub fn wav_bytes(num_samples: usize, amplitude: i16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("create wav writer");
        for _ in 0..num_samples {
            writer.write_sample(amplitude).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
    }

    cursor.into_inner()
}

/// Run the acta binary in an isolated environment.
pub fn run_acta(args: &[&str]) -> Output {
    BinEnv::new().run(args)
}

/// Isolated HOME/XDG environment for binary-level tests.
pub struct BinEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

impl BinEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_acta"))
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("OPENAI_API_KEY")
            .env_remove("ENVIRONMENT")
            .output()
            .expect("failed to execute acta binary")
    }

    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }
}
