//! Runtime configuration for the admin API.

use std::time::Duration;

use school_core::UserId;
use ulid::Ulid;

/// Environment variable holding the simulated latency in milliseconds.
pub const LATENCY_ENV: &str = "SCHOOL_ADMIN_LATENCY_MS";
/// Environment variable that disables demo data when set to `0` or `false`.
pub const SEED_ENV: &str = "SCHOOL_ADMIN_SEED";

const DEFAULT_LATENCY_MS: u64 = 300;

/// Admin API configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Delay applied before every call, imitating a network round trip.
    pub latency: Duration,
    /// Whether demo data is loaded into an empty store at startup.
    pub seed_demo_data: bool,
    /// User recorded as the actor in audit logs.
    pub actor: UserId,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            seed_demo_data: true,
            actor: UserId(Ulid::nil()),
        }
    }
}

impl ServiceConfig {
    /// Configuration for tests: no latency, no demo data.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            seed_demo_data: false,
            ..Default::default()
        }
    }

    /// Read overrides from the environment, keeping defaults for anything unset or malformed.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(LATENCY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.latency = Duration::from_millis(ms),
                Err(_) => tracing::warn!("Ignoring invalid {}: {:?}", LATENCY_ENV, raw),
            }
        }

        if let Ok(raw) = std::env::var(SEED_ENV) {
            config.seed_demo_data = !matches!(raw.trim(), "0" | "false" | "no" | "off");
        }

        config
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_actor(mut self, actor: UserId) -> Self {
        self.actor = actor;
        self
    }
}
