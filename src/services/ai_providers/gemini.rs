use async_trait::async_trait;
use reqwest::Client;
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::prompt_generator::generate_prompt;
use crate::prompts::system_prompt::SYSTEM_PROMPT;
use crate::services::ai_providers::ensure_success;
use crate::structs::ai::gemini::gemini_content::GeminiContent;
use crate::structs::ai::gemini::gemini_generation_config::GeminiGenerationConfig;
use crate::structs::ai::gemini::gemini_request::GeminiRequest;
use crate::structs::ai::gemini::gemini_response::GeminiResponse;
use crate::structs::config::model_config::ModelConfig;
use crate::traits::ai_provider::AiProvider;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, client }
    }

    pub fn get_request(prompt: &str, source_text: &str, model: &ModelConfig) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent::text(Some("user"), generate_prompt(prompt, source_text))],
            system_instruction: Some(GeminiContent::text(None, SYSTEM_PROMPT.to_string())),
            generation_config: GeminiGenerationConfig {
                temperature: model.temperature,
                max_output_tokens: model.max_tokens,
                candidate_count: 1,
            },
        }
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn invoke(&self, prompt: &str, source_text: &str, model: &ModelConfig) -> Result<String, AiProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model.name);
        let request_body = Self::get_request(prompt, source_text, model);
        log::debug!("📦 Request model: {} -> {url}", model.name);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let body: GeminiResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        body.into_text()
            .ok_or_else(|| AiProviderError::SerializationError("No candidates in response".to_string()))
    }
}
