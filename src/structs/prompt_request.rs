use crate::enums::operation::Operation;
use crate::structs::config::model_config::ModelConfig;

/// Everything needed for one model call. Built per invocation and consumed once.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub operation: Operation,
    pub source_language: String,
    pub target_language: Option<String>,
    pub source_text: String,
    pub model: ModelConfig,
    pub prompt: String,
}
