use std::collections::BTreeMap;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::constants::timeout_duration;
use crate::errors::{ReverseEngineerError, ReverseEngineerResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::structs::config::model_config::ModelConfig;
use crate::structs::config::rate_limit_policy::RateLimitPolicy;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub default_model: String,

    pub models: BTreeMap<String, ModelConfig>,

    #[serde(default)]
    pub rate_limit: RateLimitPolicy,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(default_model: &str, models: Vec<ModelConfig>) -> Self {
        Self {
            default_model: default_model.to_string(),
            models: models.into_iter().map(|m| (m.name.clone(), m)).collect(),
            rate_limit: RateLimitPolicy::default(),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitPolicy) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Fills model names that were left out in the file from their map keys.
    pub fn normalize(mut self) -> Self {
        for (key, model) in &mut self.models {
            if model.name.trim().is_empty() {
                model.name.clone_from(key);
            }
        }
        self
    }

    pub const fn request_timeout(&self) -> Duration {
        timeout_duration(self.request_timeout_secs)
    }

    /// Looks up `requested` (or the default model) among the configured models.
    pub fn resolve_model(&self, requested: Option<&str>) -> ReverseEngineerResult<&ModelConfig> {
        let name = requested.unwrap_or(&self.default_model);
        self.models.get(name).ok_or_else(|| {
            let available = self.models.keys().cloned().collect::<Vec<_>>().join(", ");
            ReverseEngineerError::config_error(
                &format!("Unknown model '{name}'"),
                Some("models"),
                Some(&format!("Available models: {available}")),
            )
        })
    }
}
