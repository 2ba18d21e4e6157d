//! Startup fetch of pool data
//!
//! Both requests run concurrently. Failures are logged and absorbed so the
//! calculator always has something to run against.

use chrono::{DateTime, Utc};

use super::client::{PoolSummary, RateSource};
use super::RateTable;

/// Pool data available after startup
#[derive(Debug, Clone)]
pub struct StartupData {
    /// Rate table for the selected pool; `None` if the fetch failed
    pub rates: Option<RateTable>,

    /// Pool listing; empty if the fetch failed
    pub pools: Vec<PoolSummary>,

    /// When both requests had completed
    pub fetched_at: DateTime<Utc>,
}

impl StartupData {
    /// Rates to hand to the calculator, absent fields when nothing was fetched
    pub fn rates_or_empty(&self) -> RateTable {
        self.rates.unwrap_or_default()
    }
}

/// Fetch calculator details and the pool listing
pub async fn load_startup_data<S>(source: &S, pool_id: u32) -> StartupData
where
    S: RateSource + ?Sized,
{
    let (rates, pools) = tokio::join!(source.calculator_details(pool_id), source.all_pools());

    let rates = match rates {
        Ok(table) => Some(table),
        Err(e) => {
            log::error!("Error fetching pool details: {}", e);
            None
        }
    };

    let pools = pools.unwrap_or_else(|e| {
        log::error!("Error fetching all pools: {}", e);
        Vec::new()
    });

    StartupData {
        rates,
        pools,
        fetched_at: Utc::now(),
    }
}
