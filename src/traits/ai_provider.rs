use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::config::model_config::ModelConfig;

/// Capability boundary to a hosted model. The dispatcher only knows this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends the rendered instruction together with the source text and
    /// returns the generated text.
    async fn invoke(&self, prompt: &str, source_text: &str, model: &ModelConfig) -> Result<String, AiProviderError>;
}
