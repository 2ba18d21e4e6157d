//! Client configuration for the pool API

use std::time::Duration;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://dev-testnet.nordl.io";

/// Pool whose calculator details are fetched when none is given
pub const DEFAULT_POOL_ID: u32 = 11;

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_BASE_URL: &str = "FUND_PROJECTION_BASE_URL";
pub const ENV_POOL_ID: &str = "FUND_PROJECTION_POOL_ID";
pub const ENV_TIMEOUT_SECS: &str = "FUND_PROJECTION_TIMEOUT_SECS";

/// Where and how to fetch pool data
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host, without trailing slash
    pub base_url: String,

    /// Pool id for the calculator-details endpoint
    pub pool_id: u32,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pool_id: DEFAULT_POOL_ID,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `FUND_PROJECTION_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparseable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_POOL_ID) {
            match raw.trim().parse() {
                Ok(id) => config.pool_id = id,
                Err(_) => log::warn!("Ignoring invalid {}: {:?}", ENV_POOL_ID, raw),
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!("Ignoring invalid {}: {:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        config
    }

    pub fn calculator_details_url(&self, pool_id: u32) -> String {
        format!("{}/api/product/calculator-details/{}", self.base_url, pool_id)
    }

    pub fn all_pools_url(&self) -> String {
        format!("{}/api/product/all-pools", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_urls() {
        let config = ClientConfig::default();
        assert_eq!(
            config.calculator_details_url(config.pool_id),
            "https://dev-testnet.nordl.io/api/product/calculator-details/11"
        );
        assert_eq!(config.all_pools_url(), "https://dev-testnet.nordl.io/api/product/all-pools");
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://localhost:8080/"),
            (ENV_POOL_ID, "42"),
            (ENV_TIMEOUT_SECS, "5"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.pool_id, 42);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(|k| match k {
            ENV_POOL_ID => Some("eleven".to_string()),
            ENV_TIMEOUT_SECS => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config, ClientConfig::default());
    }
}
