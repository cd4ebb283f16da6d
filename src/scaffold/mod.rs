//! Deployment artifact scaffolding.
//!
//! Writes the container build file, compose file, and per-environment
//! secrets placeholders. This is an explicit one-time step (`acta scaffold`);
//! running the server never writes any of these.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environments that get a secrets placeholder file.
pub const ENVIRONMENTS: [&str; 4] = ["development", "testing", "staging", "production"];

const DOCKERFILE: &str = r#"FROM rust:1.79 AS builder

WORKDIR /app

# whisper-rs builds whisper.cpp from source
RUN apt-get update && apt-get install -y cmake clang && rm -rf /var/lib/apt/lists/*

COPY . .

RUN cargo build --release

FROM debian:bookworm-slim

RUN apt-get update && apt-get install -y ffmpeg ca-certificates && rm -rf /var/lib/apt/lists/*

COPY --from=builder /app/target/release/acta /usr/local/bin/acta

EXPOSE 8000

CMD ["acta", "serve", "--host", "0.0.0.0", "--port", "8000"]
"#;

const DOCKER_COMPOSE: &str = r#"services:
  app:
    build: .
    ports:
      - "8000:8000"
    environment:
      - ENVIRONMENT=${ENVIRONMENT:-development}
    env_file:
      - .env.${ENVIRONMENT:-development}
"#;

const ENV_PLACEHOLDER: &str = "OPENAI_API_KEY=your_api_key_here\n";

/// Write all artifacts into `dir`, returning the paths actually written.
///
/// Existing files are left alone unless `force` is set.
pub fn write_artifacts(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = Vec::new();

    write_artifact(dir.join("Dockerfile"), DOCKERFILE, force, &mut written)?;
    write_artifact(
        dir.join("docker-compose.yml"),
        DOCKER_COMPOSE,
        force,
        &mut written,
    )?;

    for env in ENVIRONMENTS {
        write_artifact(
            dir.join(format!(".env.{env}")),
            ENV_PLACEHOLDER,
            force,
            &mut written,
        )?;
    }

    Ok(written)
}

fn write_artifact(
    path: PathBuf,
    content: &str,
    force: bool,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    if path.exists() && !force {
        tracing::debug!("Skipping existing {}", path.display());
        return Ok(());
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    written.push(path);

    Ok(())
}
