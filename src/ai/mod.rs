//! Capability seam for the external generative-text service.
//!
//! The orchestrator only sees `TextGenerator`: a prompt in, a stream of
//! text fragments out. That keeps its aggregation/fallback logic testable
//! against fake streams, including ones that yield nothing or fail
//! mid-stream.

pub mod gemini;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("GEMINI_API_KEY não configurada")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("could not decode stream: {0}")]
    Decode(String),
}

/// Stream of incremental text fragments, in arrival order.
pub type FragmentStream = BoxStream<'static, Result<String, GenerateError>>;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Start a streaming generation for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<FragmentStream, GenerateError>;
}
