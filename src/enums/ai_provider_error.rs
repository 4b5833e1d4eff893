use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AiProviderError {
    #[error("API Error: {0}")]
    ApiError(String),
    #[error("Network Error: {0}")]
    NetworkError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("Authentication Error: {0}")]
    AuthenticationError(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Raised before any request is sent, e.g. a missing API key.
    #[error("Configuration Error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for AiProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::SerializationError(error.to_string())
        } else {
            Self::NetworkError(error.to_string())
        }
    }
}
