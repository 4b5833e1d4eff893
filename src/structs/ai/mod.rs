pub mod anthropic;
pub mod api_error;
pub mod gemini;
pub mod openai;
