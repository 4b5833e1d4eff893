use std::env;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::provider::Provider;
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::ai_providers::openai::OpenAIProvider;
use crate::structs::config::model_config::ModelConfig;
use crate::traits::ai_provider::AiProvider;

/// Picks the concrete provider for each request from the model's configuration.
#[derive(Clone)]
pub struct ProviderRouter {
    client: Client,
}

impl ProviderRouter {
    pub fn new(request_timeout: Duration) -> Result<Self, AiProviderError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiProviderError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn api_key(model: &ModelConfig) -> Result<String, AiProviderError> {
        let key_env = model.api_key_env();
        match env::var(&key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(AiProviderError::Configuration(format!(
                "API key for model '{}' not found. Set the {key_env} environment variable",
                model.name
            ))),
        }
    }

    fn provider_for(&self, model: &ModelConfig) -> Result<Box<dyn AiProvider>, AiProviderError> {
        let base_url = model.base_url().ok_or_else(|| {
            AiProviderError::Configuration(format!(
                "Model '{}' uses provider '{}' which requires api_base",
                model.name, model.provider
            ))
        })?;
        let api_key = Self::api_key(model)?;
        let client = self.client.clone();

        Ok(match model.provider {
            Provider::Anthropic => Box::new(AnthropicProvider::new(client, api_key, base_url)),
            Provider::Gemini => Box::new(GeminiProvider::new(client, api_key, base_url)),
            Provider::OpenAI | Provider::DeepSeek | Provider::Other => {
                Box::new(OpenAIProvider::new(client, api_key, base_url))
            }
        })
    }
}

#[async_trait]
impl AiProvider for ProviderRouter {
    async fn invoke(&self, prompt: &str, source_text: &str, model: &ModelConfig) -> Result<String, AiProviderError> {
        let provider = self.provider_for(model)?;
        log::debug!("🔌 Routing '{}' through {}", model.name, model.provider);
        provider.invoke(prompt, source_text, model).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let router = ProviderRouter::new(Duration::from_secs(1)).unwrap();
        let model = ModelConfig::new("gpt-4o", Provider::OpenAI)
            .with_api_key_env("REVERSE_ENGINEER_TEST_UNSET_KEY")
            .with_api_base("http://127.0.0.1:9");

        let err = router.invoke("Explain", "x = 1", &model).await.unwrap_err();
        match err {
            AiProviderError::Configuration(message) => {
                assert!(message.contains("REVERSE_ENGINEER_TEST_UNSET_KEY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_provider_requires_api_base() {
        let router = ProviderRouter::new(Duration::from_secs(1)).unwrap();
        let model = ModelConfig::new("local-llama", Provider::Other);

        let err = router.invoke("Explain", "x = 1", &model).await.unwrap_err();
        assert!(matches!(err, AiProviderError::Configuration(ref m) if m.contains("api_base")));
    }
}
