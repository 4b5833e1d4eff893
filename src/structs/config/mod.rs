pub mod config;
pub mod model_config;
pub mod rate_limit_policy;
