use async_trait::async_trait;
use reqwest::Client;
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::prompt_generator::generate_prompt;
use crate::prompts::system_prompt::SYSTEM_PROMPT;
use crate::services::ai_providers::ensure_success;
use crate::structs::ai::openai::openai_message::OpenAIMessage;
use crate::structs::ai::openai::openai_request::OpenAIRequest;
use crate::structs::ai::openai::openai_response::OpenAIResponse;
use crate::structs::config::model_config::ModelConfig;
use crate::traits::ai_provider::AiProvider;

/// Chat Completions API. Also serves DeepSeek and other compatible endpoints.
#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, client }
    }

    pub fn get_request(prompt: &str, source_text: &str, model: &ModelConfig) -> OpenAIRequest {
        OpenAIRequest {
            model: model.name.clone(),
            messages: vec![
                OpenAIMessage::system(SYSTEM_PROMPT),
                OpenAIMessage::user(generate_prompt(prompt, source_text)),
            ],
            max_tokens: model.max_tokens,
            temperature: model.temperature,
            stream: false,
        }
    }
}

#[async_trait]
impl AiProvider for OpenAIProvider {
    async fn invoke(&self, prompt: &str, source_text: &str, model: &ModelConfig) -> Result<String, AiProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request_body = Self::get_request(prompt, source_text, model);
        log::debug!("📦 Request model: {} -> {url}", request_body.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let body: OpenAIResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        if let Some(usage) = body.usage {
            log::debug!("🔢 Tokens: {} prompt, {} completion", usage.prompt_tokens, usage.completion_tokens);
        }

        body.into_text()
            .ok_or_else(|| AiProviderError::SerializationError("No content in response".to_string()))
    }
}
