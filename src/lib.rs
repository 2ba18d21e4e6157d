//! Fund Projection - recurring investment projection against pool rate tables
//!
//! This library provides:
//! - Compound-growth projection of an investment by contribution frequency
//! - Rate table decoding, offline loading and HTTP fetching from the pool API
//! - Batch scenarios (duration schedules, frequency comparisons, CSV export)
//! - A headless calculator session holding the presentation state

pub mod config;
pub mod error;
pub mod rates;
pub mod projection;
pub mod scenario;
pub mod session;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{NetworkError, ProjectionError, RateLoadError};
pub use rates::{Frequency, RateTable, RateSource, HttpRateClient};
pub use projection::{ProjectionCalculator, ProjectionInput, ProjectionResult, ProjectionStatus};
pub use scenario::ScenarioRunner;
pub use session::{CalculatorSession, Fund};
