//! Per-IP rate limit configuration.
//!
//! - `RATE_LIMIT_ENABLED`: turn limiting off entirely (default: true)
//! - `RATE_LIMIT_GENERAL_PER_SECOND` / `RATE_LIMIT_GENERAL_BURST_SIZE`: every API route (default: 10 / 50)
//! - `RATE_LIMIT_AUTH_PER_SECOND` / `RATE_LIMIT_AUTH_BURST_SIZE`: signup (default: 1 / 5)
//!
//! Quotas follow the token bucket model: the bucket holds `burst_size`
//! tokens and refills `per_second` tokens each second.

use std::num::NonZeroU32;

use governor::Quota;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub general_per_second: u32,
    pub general_burst_size: u32,
    pub auth_per_second: u32,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_per_second: 10,
            general_burst_size: 50,
            auth_per_second: 1,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            general_per_second: env_or("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_or("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Limiting switched off, for tests and local tooling.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Quota for general API routes, `None` when limiting is off.
    #[must_use]
    pub fn general_quota(&self) -> Option<Quota> {
        self.quota(self.general_per_second, self.general_burst_size)
    }

    /// Stricter quota for account creation.
    #[must_use]
    pub fn auth_quota(&self) -> Option<Quota> {
        self.quota(self.auth_per_second, self.auth_burst_size)
    }

    fn quota(&self, per_second: u32, burst: u32) -> Option<Quota> {
        if !self.enabled {
            return None;
        }
        let per_second = NonZeroU32::new(per_second.max(1))?;
        let burst = NonZeroU32::new(burst.max(1))?;
        Some(Quota::per_second(per_second).allow_burst(burst))
    }
}
