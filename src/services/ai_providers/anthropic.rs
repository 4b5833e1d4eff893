use async_trait::async_trait;
use reqwest::Client;
use crate::config::constants::ANTHROPIC_API_VERSION;
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::prompt_generator::generate_prompt;
use crate::prompts::system_prompt::SYSTEM_PROMPT;
use crate::services::ai_providers::ensure_success;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;
use crate::structs::ai::anthropic::anthropic_message_request::AnthropicMessageRequest;
use crate::structs::ai::anthropic::anthropic_response::AnthropicResponse;
use crate::structs::config::model_config::ModelConfig;
use crate::traits::ai_provider::AiProvider;

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, client }
    }

    pub fn get_request(prompt: &str, source_text: &str, model: &ModelConfig) -> AnthropicMessageRequest {
        AnthropicMessageRequest {
            model: model.name.clone(),
            system: SYSTEM_PROMPT.to_string(),
            max_tokens: model.max_tokens,
            temperature: model.temperature,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: generate_prompt(prompt, source_text),
            }],
        }
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn invoke(&self, prompt: &str, source_text: &str, model: &ModelConfig) -> Result<String, AiProviderError> {
        let url = format!("{}/messages", self.base_url);
        let request_body = Self::get_request(prompt, source_text, model);
        log::debug!("📦 Request model: {} -> {url}", request_body.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request_body)
            .send()
            .await?;

        let body: AnthropicResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        if let Some(usage) = body.usage {
            log::debug!("🔢 Tokens: {} input, {} output", usage.input_tokens, usage.output_tokens);
        }
        if body.stop_reason.as_deref() == Some("max_tokens") {
            log::warn!("⚠️ Response was cut off at max_tokens ({})", model.max_tokens);
        }

        body.into_text()
            .ok_or_else(|| AiProviderError::SerializationError("No text content in response".to_string()))
    }
}
