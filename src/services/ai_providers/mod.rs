pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod router;

use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::ai::api_error::ApiErrorEnvelope;

/// Maps a non-2xx provider response to an error carrying the provider's message.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = ApiErrorEnvelope::describe(&body);

    Err(match status.as_u16() {
        401 | 403 => AiProviderError::AuthenticationError(message),
        429 => AiProviderError::ApiError(format!("Rate limit exceeded: {message}")),
        _ => AiProviderError::ApiError(format!("HTTP {status}: {message}")),
    })
}
