pub mod ai_provider_error;
pub mod commands;
pub mod operation;
pub mod provider;
pub mod rate_decision;
