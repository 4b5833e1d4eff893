pub mod ai_providers;
pub mod dispatcher;
pub mod rate_limiter;
pub mod result_sink;
pub mod source_resolver;
