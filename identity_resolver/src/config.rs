//! Central configuration for the identity resolution service

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable enabling the cross-account check in `link`
pub const ENV_LINK_CONFLICT_CHECK: &str = "IDENTITY_LINK_CONFLICT_CHECK";
/// Environment variable bounding create-conflict retries in `login`
pub const ENV_CREATE_CONFLICT_RETRIES: &str = "IDENTITY_CREATE_CONFLICT_RETRIES";
/// Environment variable giving the default per-operation timeout, in seconds
pub const ENV_OPERATION_TIMEOUT_SECS: &str = "IDENTITY_OPERATION_TIMEOUT_SECS";

/// Tunables of [`IdentityService`](crate::IdentityService)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Refuse to link a (method, external id) pair already bound to another account.
    /// Off by default: linking then relies on the repository's uniqueness index alone.
    pub link_conflict_check: bool,
    /// How many times `login` re-fetches and updates after losing a create race
    pub create_conflict_retries: u32,
    /// Deadline applied to requests whose context carries none
    pub default_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            link_conflict_check: false,
            create_conflict_retries: 1,
            default_timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Build a config from `IDENTITY_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout_secs: u64 = env_or(ENV_OPERATION_TIMEOUT_SECS, 0);

        Self {
            link_conflict_check: env_or(ENV_LINK_CONFLICT_CHECK, defaults.link_conflict_check),
            create_conflict_retries: env_or(
                ENV_CREATE_CONFLICT_RETRIES,
                defaults.create_conflict_retries,
            ),
            default_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    pub fn with_link_conflict_check(mut self, enabled: bool) -> Self {
        self.link_conflict_check = enabled;
        self
    }

    pub fn with_create_conflict_retries(mut self, retries: u32) -> Self {
        self.create_conflict_retries = retries;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}
