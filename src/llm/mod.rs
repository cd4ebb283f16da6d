//! LLM module for acta
//!
//! Turns meeting transcripts into structured minutes via the OpenAI
//! completion API.

mod client;
mod openai;
mod prompts;

pub use client::{build_provider, LlmProvider, MinutesRequest};
pub use openai::OpenAiClient;
pub use prompts::build_minutes_prompt;
