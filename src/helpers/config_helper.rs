use crate::config::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_RATE_LIMIT, DEFAULT_RATE_LIMIT_TIME_FRAME_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TEMPERATURE,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub const fn default_max_tokens() -> u32 {
        DEFAULT_MAX_TOKENS
    }

    pub const fn default_temperature() -> f32 {
        DEFAULT_TEMPERATURE
    }

    pub const fn default_rate_limit() -> u32 {
        DEFAULT_RATE_LIMIT
    }

    pub const fn default_time_frame() -> u64 {
        DEFAULT_RATE_LIMIT_TIME_FRAME_SECS
    }

    pub const fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }
}
