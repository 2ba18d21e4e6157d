//! JSON-based rate table loader
//!
//! Loads a pool's rate table from a local file for offline runs.

use std::fs;
use std::path::Path;

use super::RateTable;
use crate::error::RateLoadError;

/// Default path to the offline rate file
pub const DEFAULT_RATES_PATH: &str = "data/rates.json";

/// Load a rate table from a JSON file
///
/// Accepts either a bare rate object or the server envelope `{ "data": { ... } }`.
pub fn load_rate_table<P: AsRef<Path>>(path: P) -> Result<RateTable, RateLoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let table = RateTable::from_json_str(&contents)?;
    log::info!("Loaded rate table from {}: {:?}", path.display(), table);
    Ok(table)
}

/// Load the rate table from [`DEFAULT_RATES_PATH`]
pub fn load_default_rates() -> Result<RateTable, RateLoadError> {
    load_rate_table(DEFAULT_RATES_PATH)
}
