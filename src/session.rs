//! Calculator session: the presentation state around a projection
//!
//! Holds what the screen holds (amount slider, fund picker, frequency
//! buttons, duration slider, results view) and turns it into an immutable
//! [`ProjectionInput`] on each calculate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::projection::{ProjectionCalculator, ProjectionInput, ProjectionResult, MAX_DURATION_YEARS, MIN_DURATION_YEARS};
use crate::rates::{Frequency, RateTable};

/// Amount slider bounds and step
pub const MIN_AMOUNT: f64 = 0.0;
pub const MAX_AMOUNT: f64 = 20_000.0;
pub const AMOUNT_STEP: f64 = 100.0;

/// Funds offered by the picker. Informational only; rates come from the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fund {
    #[default]
    #[serde(rename = "Grayscale Bitcoin Trust")]
    GrayscaleBitcoinTrust,
    #[serde(rename = "Option 1")]
    Option1,
    #[serde(rename = "Option 2")]
    Option2,
    #[serde(rename = "Option 3")]
    Option3,
}

impl Fund {
    pub const ALL: [Fund; 4] = [Fund::GrayscaleBitcoinTrust, Fund::Option1, Fund::Option2, Fund::Option3];

    pub fn label(&self) -> &'static str {
        match self {
            Fund::GrayscaleBitcoinTrust => "Grayscale Bitcoin Trust",
            Fund::Option1 => "Option 1",
            Fund::Option2 => "Option 2",
            Fund::Option3 => "Option 3",
        }
    }
}

impl fmt::Display for Fund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Fund {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fund::ALL
            .into_iter()
            .find(|fund| fund.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown fund: {}", s))
    }
}

/// Clamp to the slider range and snap to the nearest step
fn snap_amount(amount: f64) -> f64 {
    if !amount.is_finite() {
        return MIN_AMOUNT;
    }
    let clamped = amount.clamp(MIN_AMOUNT, MAX_AMOUNT);
    (clamped / AMOUNT_STEP).round() * AMOUNT_STEP
}

/// Label shown next to the amount slider: "0", "1.5k", "20k"
pub fn amount_label(amount: f64) -> String {
    if amount == 0.0 {
        "0".to_string()
    } else {
        format!("{}k", amount / 1000.0)
    }
}

/// Mutable screen state; the calculator itself never sees it
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    amount: f64,
    fund: Fund,
    frequency: Frequency,
    duration_years: u32,
    rates: Option<RateTable>,
    results: Option<ProjectionResult>,
    results_visible: bool,
    calculator: ProjectionCalculator,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self {
            amount: MIN_AMOUNT,
            fund: Fund::default(),
            frequency: Frequency::Weekly,
            duration_years: MIN_DURATION_YEARS,
            rates: None,
            results: None,
            results_visible: false,
            calculator: ProjectionCalculator::new(),
        }
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded with fetched rates (or none, if the fetch failed)
    pub fn with_rates(rates: Option<RateTable>) -> Self {
        Self {
            rates,
            ..Self::default()
        }
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = snap_amount(amount);
    }

    pub fn set_fund(&mut self, fund: Fund) {
        self.fund = fund;
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub fn set_duration_years(&mut self, years: u32) {
        self.duration_years = years.clamp(MIN_DURATION_YEARS, MAX_DURATION_YEARS);
    }

    /// Replace the rate table, e.g. once a late fetch completes
    pub fn set_rates(&mut self, rates: Option<RateTable>) {
        self.rates = rates;
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn amount_label(&self) -> String {
        amount_label(self.amount)
    }

    pub fn fund(&self) -> Fund {
        self.fund
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn duration_years(&self) -> u32 {
        self.duration_years
    }

    pub fn rates(&self) -> Option<&RateTable> {
        self.rates.as_ref()
    }

    pub fn results(&self) -> Option<&ProjectionResult> {
        self.results.as_ref()
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    /// Snapshot the current state as an input record
    pub fn input(&self) -> Result<ProjectionInput, ProjectionError> {
        ProjectionInput::new(
            self.amount,
            self.frequency,
            self.duration_years,
            self.rates.unwrap_or_default(),
        )
    }

    /// Run the projection and open the results view
    pub fn calculate(&mut self) -> Result<&ProjectionResult, ProjectionError> {
        let input = self.input()?;
        let result = self.calculator.compute(&input);
        log::info!(
            "Projected {} {} over {} yrs ({}): {:.2} -> {:.2}",
            self.fund,
            self.frequency,
            self.duration_years,
            if result.is_skipped() { "skipped" } else { "computed" },
            result.invested_amount,
            result.final_amount,
        );

        self.results_visible = true;
        Ok(&*self.results.insert(result))
    }

    /// Close the results view and reset amount and duration
    pub fn close(&mut self) {
        self.results_visible = false;
        self.results = None;
        self.amount = MIN_AMOUNT;
        self.duration_years = MIN_DURATION_YEARS;
    }
}
