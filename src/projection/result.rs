//! Projection output structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rates::Frequency;

/// Why a projection was not computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// No usable rate for the selected frequency
    MissingRate(Frequency),
    /// Final amount or percentage change exceeds the f64 range
    Overflow,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRate(frequency) => write!(f, "no {} rate available", frequency),
            SkipReason::Overflow => f.write_str("projection out of range"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ProjectionStatus {
    Computed,
    Skipped { reason: SkipReason },
}

/// Result of one projection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub frequency: Frequency,
    pub duration_years: u32,

    /// Rate applied; `None` when skipped
    pub rate: Option<f64>,

    /// Equals the input principal
    pub invested_amount: f64,
    pub final_amount: f64,

    /// Percent, not fraction. 0.0 when nothing was invested or the projection was skipped
    pub percentage_change: f64,

    pub status: ProjectionStatus,
}

impl ProjectionResult {
    /// No-op result: final amount equals the invested amount
    pub fn skipped(invested_amount: f64, frequency: Frequency, duration_years: u32, reason: SkipReason) -> Self {
        Self {
            frequency,
            duration_years,
            rate: None,
            invested_amount,
            final_amount: invested_amount,
            percentage_change: 0.0,
            status: ProjectionStatus::Skipped { reason },
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, ProjectionStatus::Skipped { .. })
    }

    /// Absolute gain over the invested amount
    pub fn gain(&self) -> f64 {
        self.final_amount - self.invested_amount
    }
}

impl fmt::Display for ProjectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invested Amount: {}", self.invested_amount)?;
        writeln!(f, "Final Amount: {:.2}", self.final_amount)?;
        write!(f, "Percentage Change: {:.2}%", self.percentage_change)
    }
}
