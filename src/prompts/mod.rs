pub mod system_prompt;
pub mod templates;
