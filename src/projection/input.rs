//! Validated projection input

use serde::Serialize;

use crate::error::ProjectionError;
use crate::rates::{Frequency, RateTable};

/// Shortest supported duration in years
pub const MIN_DURATION_YEARS: u32 = 1;

/// Longest supported duration in years
pub const MAX_DURATION_YEARS: u32 = 10;

/// Snapshot of the user's choices plus the rates to project with
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    principal: f64,
    frequency: Frequency,
    duration_years: u32,
    rates: RateTable,
}

impl ProjectionInput {
    /// Build an input, rejecting negative/non-finite principals and durations outside 1..=10
    pub fn new(
        principal: f64,
        frequency: Frequency,
        duration_years: u32,
        rates: RateTable,
    ) -> Result<Self, ProjectionError> {
        if !principal.is_finite() || principal < 0.0 {
            return Err(ProjectionError::InvalidPrincipal(principal));
        }

        if !(MIN_DURATION_YEARS..=MAX_DURATION_YEARS).contains(&duration_years) {
            return Err(ProjectionError::DurationOutOfRange {
                years: duration_years,
                min: MIN_DURATION_YEARS,
                max: MAX_DURATION_YEARS,
            });
        }

        Ok(Self {
            principal,
            frequency,
            duration_years,
            rates,
        })
    }

    /// Same principal, frequency and duration against another rate table
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn duration_years(&self) -> u32 {
        self.duration_years
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}
