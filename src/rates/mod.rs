//! Pool rate tables: decoding, offline loading and HTTP fetching

mod table;
mod client;
mod startup;
pub mod loader;

pub use table::{Frequency, RateTable};
pub use client::{HttpRateClient, PoolSummary, RateSource, StaticRateSource};
pub use startup::{load_startup_data, StartupData};
pub use loader::{load_rate_table, load_default_rates, DEFAULT_RATES_PATH};
