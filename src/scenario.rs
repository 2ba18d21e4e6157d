//! Scenario runner for batch projections
//!
//! Holds one rate table and runs many projections against it: a full
//! duration schedule, a side-by-side frequency comparison, or an arbitrary
//! batch spread across the rayon pool.

use std::io::Write;

use rayon::prelude::*;

use crate::error::ProjectionError;
use crate::projection::{
    ProjectionCalculator, ProjectionInput, ProjectionResult, ProjectionStatus, MAX_DURATION_YEARS,
    MIN_DURATION_YEARS,
};
use crate::rates::{Frequency, RateTable};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::with_rates(rates);
/// for row in runner.duration_schedule(1000.0, Frequency::Monthly)? {
///     println!("{} yrs: {:.2}", row.duration_years, row.final_amount);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    rates: RateTable,
    calculator: ProjectionCalculator,
}

impl ScenarioRunner {
    /// Runner with every rate absent; every projection is skipped
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: RateTable) -> Self {
        Self {
            rates,
            calculator: ProjectionCalculator::new(),
        }
    }

    /// Single projection against the held rates
    pub fn run(&self, principal: f64, frequency: Frequency, duration_years: u32) -> Result<ProjectionResult, ProjectionError> {
        let input = ProjectionInput::new(principal, frequency, duration_years, self.rates)?;
        Ok(self.calculator.compute(&input))
    }

    /// One projection per supported duration (1..=10 years)
    pub fn duration_schedule(&self, principal: f64, frequency: Frequency) -> Result<Vec<ProjectionResult>, ProjectionError> {
        (MIN_DURATION_YEARS..=MAX_DURATION_YEARS)
            .map(|years| self.run(principal, frequency, years))
            .collect()
    }

    /// One projection per frequency at a fixed duration
    pub fn compare_frequencies(&self, principal: f64, duration_years: u32) -> Result<Vec<ProjectionResult>, ProjectionError> {
        Frequency::ALL
            .iter()
            .map(|&frequency| self.run(principal, frequency, duration_years))
            .collect()
    }

    /// Run pre-built inputs in parallel, preserving input order
    ///
    /// Each input carries its own rates; the runner's table is not used.
    pub fn run_batch(&self, inputs: &[ProjectionInput]) -> Vec<ProjectionResult> {
        inputs.par_iter().map(|input| self.calculator.compute(input)).collect()
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn rates_mut(&mut self) -> &mut RateTable {
        &mut self.rates
    }
}

/// CSV header written by [`write_csv`]
pub const CSV_HEADER: [&str; 7] = [
    "Frequency",
    "DurationYears",
    "Rate",
    "InvestedAmount",
    "FinalAmount",
    "PercentageChange",
    "Status",
];

/// Write results as CSV, one row per projection
pub fn write_csv<W: Write>(results: &[ProjectionResult], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for row in results {
        let status = match row.status {
            ProjectionStatus::Computed => "Computed".to_string(),
            ProjectionStatus::Skipped { reason } => format!("Skipped ({})", reason),
        };
        wtr.write_record([
            row.frequency.to_string(),
            row.duration_years.to_string(),
            row.rate.map(|r| format!("{:.6}", r)).unwrap_or_default(),
            format!("{:.2}", row.invested_amount),
            format!("{:.2}", row.final_amount),
            format!("{:.4}", row.percentage_change),
            status,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
