pub mod ai;
pub mod cli;
pub mod config;
pub mod prompt_request;
pub mod prompt_result;
pub mod validation_result;
