//! Process-wide gateway configuration.
//!
//! The base address is read from `API_BASE_URL` once, on first use, and never
//! changes afterwards. A missing variable means "no prefix".

use std::sync::OnceLock;

/// Environment variable holding the base address.
pub const BASE_ADDRESS_ENV: &str = "API_BASE_URL";

static GLOBAL: OnceLock<GatewayConfig> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_address: String,
}

impl GatewayConfig {
    pub fn new(base_address: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_address: lookup(BASE_ADDRESS_ENV).unwrap_or_default(),
        }
    }
}

/// The process-wide configuration, initialized from the environment on first
/// access.
pub fn global() -> &'static GatewayConfig {
    GLOBAL.get_or_init(|| {
        let config = GatewayConfig::from_env();
        tracing::debug!(base_address = %config.base_address, "gateway config loaded");
        config
    })
}
