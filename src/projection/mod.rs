//! Projection calculator for recurring fund investments

mod input;
mod result;
mod calculator;

pub use input::{ProjectionInput, MIN_DURATION_YEARS, MAX_DURATION_YEARS};
pub use result::{ProjectionResult, ProjectionStatus, SkipReason};
pub use calculator::{compute, growth_factor, percentage_change, ProjectionCalculator};
