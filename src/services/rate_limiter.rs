use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use crate::enums::rate_decision::RateDecision;
use crate::structs::config::rate_limit_policy::RateLimitPolicy;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        self.origin + offset
    }
}

/// Sliding-window request counter shared by every command in the process.
pub struct ApiRateLimiter {
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    window: Mutex<VecDeque<Instant>>,
}

impl ApiRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            window: Mutex::new(VecDeque::new()),
        }
    }

    pub const fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Prunes expired timestamps, then records a request if a slot is free.
    pub fn check_and_record(&self) -> RateDecision {
        let now = self.clock.now();
        let mut window = self.lock_window();
        self.prune(&mut window, now);

        if window.len() < self.policy.limit as usize {
            window.push_back(now);
            return RateDecision::Allowed;
        }

        let span = self.policy.window();
        let retry_after = window.front().map_or(Duration::ZERO, |oldest| {
            oldest
                .checked_add(span)
                .map_or(span, |expires| expires.saturating_duration_since(now))
        });

        RateDecision::Denied { retry_after }
    }

    pub fn remaining(&self) -> u32 {
        let now = self.clock.now();
        let mut window = self.lock_window();
        self.prune(&mut window, now);
        let used = u32::try_from(window.len()).unwrap_or(u32::MAX);
        self.policy.limit.saturating_sub(used)
    }

    fn prune(&self, window: &mut VecDeque<Instant>, now: Instant) {
        let span = self.policy.window();
        while window.front().is_some_and(|oldest| now.saturating_duration_since(*oldest) >= span) {
            window.pop_front();
        }
    }

    fn lock_window(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        self.window.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
