mod open_ai;
pub mod prompt;
pub mod storage;

pub use open_ai::OpenAiImageClient;

use async_trait::async_trait;

use crate::error::VaultError;

/// Remote image-generation service.
///
/// One request/response exchange: a prompt goes in, a base64-encoded PNG
/// comes back. Implementations are shared across background jobs.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Generate an image for the prompt, returning base64 PNG data
    async fn generate(&self, prompt: &str) -> Result<String, VaultError>;
}
