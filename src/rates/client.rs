//! Pool API client
//!
//! Fetches calculator details (the rate table) and the pool listing. The
//! [`RateSource`] trait lets callers swap the HTTP client for in-memory data.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::RateTable;
use crate::config::ClientConfig;
use crate::error::NetworkError;

/// One entry of the `all-pools` listing
///
/// Only `id` and `name` are named; every other field is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// The listing arrives either bare or wrapped in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum PoolsBody {
    List(Vec<PoolSummary>),
    Wrapped { data: Vec<PoolSummary> },
}

impl From<PoolsBody> for Vec<PoolSummary> {
    fn from(body: PoolsBody) -> Self {
        match body {
            PoolsBody::List(pools) | PoolsBody::Wrapped { data: pools } => pools,
        }
    }
}

/// Source of pool rate data
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Rate table for a single pool
    async fn calculator_details(&self, pool_id: u32) -> Result<RateTable, NetworkError>;

    /// Summary of every pool
    async fn all_pools(&self) -> Result<Vec<PoolSummary>, NetworkError>;
}

/// reqwest-backed [`RateSource`]
pub struct HttpRateClient {
    client: Client,
    config: ClientConfig,
}

impl HttpRateClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("HTTP client build failed ({}); using defaults without the {:?} timeout", e, config.timeout);
                Client::new()
            });

        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, NetworkError> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| NetworkError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn decode_error(url: &str, message: impl ToString) -> NetworkError {
    NetworkError::Decode {
        url: url.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl RateSource for HttpRateClient {
    async fn calculator_details(&self, pool_id: u32) -> Result<RateTable, NetworkError> {
        let url = self.config.calculator_details_url(pool_id);
        let mut body = self.get_json(&url).await?;

        let data = match body.get_mut("data") {
            Some(data) if data.is_object() => data.take(),
            _ => return Err(decode_error(&url, "missing `data` object")),
        };

        let table: RateTable = serde_json::from_value(data).map_err(|e| decode_error(&url, e))?;
        log::info!("Fetched rate table for pool {}: {:?}", pool_id, table);
        Ok(table)
    }

    async fn all_pools(&self) -> Result<Vec<PoolSummary>, NetworkError> {
        let url = self.config.all_pools_url();
        let body = self.get_json(&url).await?;

        let pools: PoolsBody = serde_json::from_value(body).map_err(|e| decode_error(&url, e))?;
        let pools: Vec<PoolSummary> = pools.into();
        log::info!("Fetched {} pools", pools.len());
        Ok(pools)
    }
}

/// In-memory [`RateSource`] for offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    rates: RateTable,
    pools: Vec<PoolSummary>,
}

impl StaticRateSource {
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates,
            pools: Vec::new(),
        }
    }

    pub fn with_pools(mut self, pools: Vec<PoolSummary>) -> Self {
        self.pools = pools;
        self
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn calculator_details(&self, _pool_id: u32) -> Result<RateTable, NetworkError> {
        Ok(self.rates)
    }

    async fn all_pools(&self) -> Result<Vec<PoolSummary>, NetworkError> {
        Ok(self.pools.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::Frequency;
    use std::time::Duration;

    #[test]
    fn test_pools_body_shapes() {
        let bare: PoolsBody =
            serde_json::from_str(r#"[{"id": 11, "name": "Grayscale Bitcoin Trust", "apy": 0.12}]"#).unwrap();
        let pools: Vec<PoolSummary> = bare.into();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].name.as_deref(), Some("Grayscale Bitcoin Trust"));
        assert_eq!(pools[0].details.get("apy"), Some(&serde_json::json!(0.12)));

        let wrapped: PoolsBody = serde_json::from_str(r#"{"data": [{"id": "a"}, {}]}"#).unwrap();
        let pools: Vec<PoolSummary> = wrapped.into();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].id, Some(serde_json::json!("a")));
        assert!(pools[1].id.is_none());
    }

    #[test]
    fn test_new_keeps_configured_timeout() {
        let config = ClientConfig {
            timeout: Duration::from_secs(7),
            ..ClientConfig::default()
        };
        let client = HttpRateClient::new(config.clone());
        assert_eq!(client.config(), &config);
        assert_eq!(client.config().timeout, Duration::from_secs(7));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticRateSource::new(RateTable::empty().with_monthly(0.02));
        let table = source.calculator_details(11).await.unwrap();
        assert_eq!(table.rate_for(Frequency::Monthly), Some(0.02));
        assert!(source.all_pools().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let client = HttpRateClient::new(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            pool_id: 11,
            timeout: Duration::from_secs(2),
        });

        let err = client.calculator_details(11).await.unwrap_err();
        assert!(
            matches!(err, NetworkError::Request { .. } | NetworkError::Status { .. }),
            "unexpected error: {err}"
        );
    }
}
