use crate::error::AppError;
use async_trait::async_trait;

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// System-level instructions for the model.
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Defines the public interface for a remote text-understanding model.
///
/// This trait abstracts the specific backend, allowing the analysis gateway and the
/// suggestion engine to run against a hosted API in production and a mock in tests.
/// Callers bound every call with their own timeout.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Generates a complete text response for a prompt.
    async fn generate_with_params(
        &self,
        prompt: String,
        params: GenerationParams,
    ) -> Result<String, AppError>;
}
