//! Monthly compounding loop

use super::{ProjectionInput, ProjectionRow, ProjectionSeries, MONTHS_PER_YEAR};
use crate::error::InvalidInputError;
use chrono::Months;
use log::{debug, warn};

/// Monthly rate equivalent to `annual_rate` when compounded twelve times.
///
/// `(1 + annual)^(1/12) - 1`, not `annual / 12`.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / f64::from(MONTHS_PER_YEAR)) - 1.0
}

/// Stateless projection engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine;

impl ProjectionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Project `input` month by month.
    ///
    /// Row 0 is the opening balance. For each later month, interest accrues on
    /// the previous month's value and the contribution is added afterwards, so
    /// a contribution only starts earning in the following month. Values are
    /// neither rounded nor clamped; a withdrawal larger than the balance keeps
    /// compounding a negative balance.
    pub fn project(&self, input: &ProjectionInput) -> Result<ProjectionSeries, InvalidInputError> {
        input.validate()?;
        let months = input.duration_months()?;
        let start = input.start_month();

        // Reject an unrepresentable calendar before allocating the rows
        start
            .checked_add_months(Months::new(months))
            .ok_or(InvalidInputError::DateOverflow { start, offset: months })?;

        let rate = monthly_rate(input.annual_rate);
        debug!(
            "Projecting {} months from {} (annual rate {:.6}, monthly rate {:.8})",
            months, start, input.annual_rate, rate
        );

        let contribution = input.monthly_contribution;
        let mut rows = Vec::with_capacity(months as usize + 1);
        let mut value = input.initial_balance;

        for i in 0..=months {
            let month = start
                .checked_add_months(Months::new(i))
                .ok_or(InvalidInputError::DateOverflow { start, offset: i })?;

            if i > 0 {
                value = value * rate + value + contribution;
            }

            rows.push(ProjectionRow {
                month,
                invested_amount: input.initial_balance + contribution * f64::from(i),
                accumulated_value: value,
            });
        }

        if value < 0.0 {
            warn!("Projection from {} ends with a negative balance of {:.2}", start, value);
        }

        Ok(ProjectionSeries::new(rate, rows))
    }
}

/// Project with the default engine
pub fn project(input: &ProjectionInput) -> Result<ProjectionSeries, InvalidInputError> {
    ProjectionEngine::new().project(input)
}
