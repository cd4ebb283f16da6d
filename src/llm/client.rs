use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Settings;
use crate::llm::openai::OpenAiClient;

/// Minutes generation request payload.
pub struct MinutesRequest<'a> {
    /// Calendar date embedded in the document, formatted YYYY-MM-DD
    pub date: &'a str,
    /// Transcript text, passed through verbatim
    pub transcript: &'a str,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate_minutes(&self, request: MinutesRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Arc<dyn LlmProvider>> {
    Ok(Arc::new(OpenAiClient::from_settings(settings)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("API key is missing"));
    }

    #[test]
    fn provider_builds_with_api_key() {
        let mut settings = Settings::default();
        settings.llm.api_key = "sk-test".to_string();

        assert!(build_provider(&settings).is_ok());
    }
}
