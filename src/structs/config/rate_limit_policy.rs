use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    #[serde(default = "ConfigHelper::default_rate_limit")]
    pub limit: u32,

    /// Window length in seconds.
    #[serde(default = "ConfigHelper::default_time_frame")]
    pub time_frame: u64,
}

impl RateLimitPolicy {
    pub const fn new(limit: u32, time_frame: u64) -> Self {
        Self { limit, time_frame }
    }

    pub const fn window(&self) -> Duration {
        Duration::from_secs(self.time_frame)
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            limit: ConfigHelper::default_rate_limit(),
            time_frame: ConfigHelper::default_time_frame(),
        }
    }
}
