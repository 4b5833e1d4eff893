use serde::Deserialize;

/// Error body shared by the supported providers: `{"error": {"message": ..}}`.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiError {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}

impl ApiErrorEnvelope {
    /// Readable message from an error body, or the raw body when it is not JSON.
    pub fn describe(body: &str) -> String {
        match serde_json::from_str::<Self>(body) {
            Ok(envelope) => {
                let kind = envelope.error.error_type.or(envelope.error.status);
                match kind {
                    Some(kind) => format!("{kind}: {}", envelope.error.message),
                    None => envelope.error.message,
                }
            }
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_openai_and_anthropic_bodies() {
        let openai = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(ApiErrorEnvelope::describe(openai), "invalid_request_error: Incorrect API key provided");

        let anthropic = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(ApiErrorEnvelope::describe(anthropic), "overloaded_error: Overloaded");
    }

    #[test]
    fn describes_gemini_and_plain_bodies() {
        let gemini = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(ApiErrorEnvelope::describe(gemini), "INVALID_ARGUMENT: API key not valid");
        assert_eq!(ApiErrorEnvelope::describe("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(ApiErrorEnvelope::describe(""), "empty response body");
    }
}
