//! Compound-growth projection

use super::input::ProjectionInput;
use super::result::{ProjectionResult, ProjectionStatus, SkipReason};
use crate::error::ProjectionError;
use crate::rates::Frequency;

/// Percentage change from `invested` to `final_amount`
///
/// Fails with [`ProjectionError::DivisionByZero`] when nothing was invested.
pub fn percentage_change(invested: f64, final_amount: f64) -> Result<f64, ProjectionError> {
    if invested == 0.0 {
        return Err(ProjectionError::DivisionByZero);
    }
    Ok((final_amount - invested) / invested * 100.0)
}

/// Growth factor applied to the principal
///
/// Weekly applies its rate once, ignoring duration. Monthly and yearly
/// compound once per year of duration.
pub fn growth_factor(frequency: Frequency, rate: f64, duration_years: u32) -> f64 {
    match frequency {
        Frequency::Weekly => 1.0 + rate,
        Frequency::Monthly | Frequency::Yearly => (1.0 + rate).powi(duration_years as i32),
    }
}

/// Stateless projection calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionCalculator;

impl ProjectionCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Project the final amount for one input
    ///
    /// A missing rate yields a skipped result (final == invested, 0%). A zero
    /// principal reports a 0% change rather than NaN. A projection too large
    /// for an f64 is skipped with [`SkipReason::Overflow`].
    pub fn compute(&self, input: &ProjectionInput) -> ProjectionResult {
        let principal = input.principal();
        let frequency = input.frequency();
        let duration = input.duration_years();

        let Some(rate) = input.rates().rate_for(frequency) else {
            log::debug!("No {} rate available, skipping projection", frequency);
            return ProjectionResult::skipped(principal, frequency, duration, SkipReason::MissingRate(frequency));
        };

        // 0 * inf would be NaN; nothing invested always grows to nothing
        let final_amount = if principal == 0.0 {
            0.0
        } else {
            principal * growth_factor(frequency, rate, duration)
        };

        let percentage_change = percentage_change(principal, final_amount).unwrap_or_else(|e| {
            log::debug!("{}; reporting 0% change", e);
            0.0
        });

        if !final_amount.is_finite() || !percentage_change.is_finite() {
            log::warn!(
                "Projection of {} at {} {} over {} yrs overflows, skipping",
                principal, rate, frequency, duration
            );
            return ProjectionResult::skipped(principal, frequency, duration, SkipReason::Overflow);
        }

        ProjectionResult {
            frequency,
            duration_years: duration,
            rate: Some(rate),
            invested_amount: principal,
            final_amount,
            percentage_change,
            status: ProjectionStatus::Computed,
        }
    }
}

/// Shorthand for `ProjectionCalculator::new().compute(input)`
pub fn compute(input: &ProjectionInput) -> ProjectionResult {
    ProjectionCalculator::new().compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;
    use approx::assert_relative_eq;

    fn rates() -> RateTable {
        RateTable::empty().with_weekly(0.01).with_monthly(0.02).with_yearly(0.12)
    }

    fn project(principal: f64, frequency: Frequency, years: u32, rates: RateTable) -> ProjectionResult {
        compute(&ProjectionInput::new(principal, frequency, years, rates).unwrap())
    }

    #[test]
    fn test_monthly_example() {
        let result = project(1000.0, Frequency::Monthly, 3, rates());
        assert_eq!(result.status, ProjectionStatus::Computed);
        assert_eq!(result.invested_amount, 1000.0);
        assert_relative_eq!(result.final_amount, 1061.208, epsilon = 1e-9);
        assert_relative_eq!(result.percentage_change, 6.1208, epsilon = 1e-9);
        assert_eq!(format!("{:.2}", result.final_amount), "1061.21");
        assert_eq!(format!("{:.2}", result.percentage_change), "6.12");
    }

    #[test]
    fn test_weekly_example_ignores_duration() {
        for years in 1..=10 {
            let result = project(5000.0, Frequency::Weekly, years, rates());
            assert_relative_eq!(result.final_amount, 5050.0, epsilon = 1e-9);
            assert_relative_eq!(result.percentage_change, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_one_year_is_single_application() {
        for principal in [0.0, 100.0, 1234.5, 20_000.0] {
            let monthly = project(principal, Frequency::Monthly, 1, rates());
            assert_relative_eq!(monthly.final_amount, principal * 1.02, epsilon = 1e-9);

            let yearly = project(principal, Frequency::Yearly, 1, rates());
            assert_relative_eq!(yearly.final_amount, principal * 1.12, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_monthly_compounds_by_year_and_increases() {
        let mut previous = 0.0;
        for years in 1..=10 {
            let result = project(1000.0, Frequency::Monthly, years, rates());
            assert_relative_eq!(result.final_amount, 1000.0 * 1.02_f64.powi(years as i32), epsilon = 1e-9);
            assert!(result.final_amount > previous);
            previous = result.final_amount;
        }
    }

    #[test]
    fn test_yearly_compounds() {
        let result = project(10_000.0, Frequency::Yearly, 5, rates());
        assert_relative_eq!(result.final_amount, 10_000.0 * 1.12_f64.powi(5), epsilon = 1e-6);
        assert_eq!(result.rate, Some(0.12));
    }

    #[test]
    fn test_missing_rate_is_noop() {
        let table = RateTable::empty().with_weekly(0.01);
        for frequency in [Frequency::Monthly, Frequency::Yearly] {
            let result = project(750.0, frequency, 4, table);
            assert!(result.is_skipped());
            assert_eq!(result.final_amount, 750.0);
            assert_eq!(result.percentage_change, 0.0);
            assert_eq!(result.rate, None);
        }
    }

    #[test]
    fn test_zero_principal_sentinel() {
        for frequency in Frequency::ALL {
            let result = project(0.0, frequency, 5, rates());
            assert_eq!(result.status, ProjectionStatus::Computed);
            assert_eq!(result.final_amount, 0.0);
            assert_eq!(result.percentage_change, 0.0);
        }
    }

    #[test]
    fn test_zero_principal_with_huge_rate_stays_finite() {
        let result = project(0.0, Frequency::Yearly, 10, RateTable::empty().with_yearly(1e40));
        assert_eq!(result.status, ProjectionStatus::Computed);
        assert_eq!(result.final_amount, 0.0);
        assert_eq!(result.percentage_change, 0.0);
    }

    #[test]
    fn test_overflow_is_skipped() {
        let cases = [
            (1e308, Frequency::Yearly, RateTable::empty().with_yearly(0.12)),
            (1.0, Frequency::Monthly, RateTable::empty().with_monthly(1e40)),
            (1.0, Frequency::Weekly, RateTable::empty().with_weekly(1e307)),
        ];
        for (principal, frequency, rates) in cases {
            let result = project(principal, frequency, 10, rates);
            assert!(result.final_amount.is_finite());
            assert!(result.percentage_change.is_finite());
            assert_eq!(result.status, ProjectionStatus::Skipped { reason: SkipReason::Overflow });
            assert_eq!(result.final_amount, principal);
            assert_eq!(result.percentage_change, 0.0);
        }
    }

    #[test]
    fn test_percentage_change_helper() {
        assert_eq!(percentage_change(0.0, 10.0), Err(ProjectionError::DivisionByZero));
        assert_relative_eq!(percentage_change(200.0, 250.0).unwrap(), 25.0);
        assert_relative_eq!(percentage_change(200.0, 150.0).unwrap(), -25.0);
    }

    #[test]
    fn test_zero_rate() {
        let result = project(500.0, Frequency::Yearly, 10, RateTable::empty().with_yearly(0.0));
        assert_eq!(result.final_amount, 500.0);
        assert_eq!(result.percentage_change, 0.0);
        assert!(!result.is_skipped());
    }
}
