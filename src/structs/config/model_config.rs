use serde::{Deserialize, Serialize};
use crate::enums::provider::Provider;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ModelConfig {
    /// Model identifier sent to the provider. Defaults to the map key.
    #[serde(default)]
    pub name: String,

    pub provider: Provider,

    #[serde(default = "ConfigHelper::default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "ConfigHelper::default_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ModelConfig {
    pub fn new(name: &str, provider: Provider) -> Self {
        Self {
            name: name.to_string(),
            provider,
            max_tokens: ConfigHelper::default_max_tokens(),
            temperature: ConfigHelper::default_temperature(),
            api_base: None,
            api_key_env: None,
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = Some(api_base.to_string());
        self
    }

    pub fn with_api_key_env(mut self, env: &str) -> Self {
        self.api_key_env = Some(env.to_string());
        self
    }

    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    /// Configured base URL, or the provider's public endpoint.
    pub fn base_url(&self) -> Option<String> {
        self.api_base
            .as_deref()
            .or_else(|| self.provider.default_base_url())
            .map(|url| url.trim_end_matches('/').to_string())
    }
}
