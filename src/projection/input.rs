//! Validated inputs for a single projection

use super::MONTHS_PER_YEAR;
use crate::error::InvalidInputError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How long to project, as given by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Months(u32),
    Years(u32),
}

impl Horizon {
    /// Build a horizon from the two optional duration sources.
    /// Exactly one of them must be present.
    pub fn from_parts(months: Option<u32>, years: Option<u32>) -> Result<Self, InvalidInputError> {
        match (months, years) {
            (Some(months), None) => Ok(Horizon::Months(months)),
            (None, Some(years)) => Ok(Horizon::Years(years)),
            (Some(months), Some(years)) => Err(InvalidInputError::AmbiguousDuration { months, years }),
            (None, None) => Err(InvalidInputError::MissingDuration),
        }
    }

    /// Total number of monthly steps, which must be positive
    pub fn months(&self) -> Result<u32, InvalidInputError> {
        let months = match *self {
            Horizon::Months(months) => months,
            Horizon::Years(years) => years
                .checked_mul(MONTHS_PER_YEAR)
                .ok_or(InvalidInputError::HorizonOverflow { years })?,
        };
        if months == 0 {
            return Err(InvalidInputError::NonPositiveDuration(months));
        }
        Ok(months)
    }
}

/// Inputs to the projection engine.
///
/// `annual_rate` is a fraction (0.10 = 10% a year). `start_date` may carry any
/// day; only its year and month are used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub initial_balance: f64,
    pub annual_rate: f64,
    pub monthly_contribution: f64,
    pub horizon: Horizon,
    pub start_date: NaiveDate,
}

impl ProjectionInput {
    /// Create a validated input
    pub fn new(
        initial_balance: f64,
        annual_rate: f64,
        monthly_contribution: f64,
        horizon: Horizon,
        start_date: NaiveDate,
    ) -> Result<Self, InvalidInputError> {
        let input = Self {
            initial_balance,
            annual_rate,
            monthly_contribution,
            horizon,
            start_date,
        };
        input.validate()?;
        Ok(input)
    }

    /// Check every precondition the engine relies on
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !self.initial_balance.is_finite() {
            return Err(InvalidInputError::NonFinite {
                field: "initial_balance",
                value: self.initial_balance,
            });
        }
        if self.initial_balance < 0.0 {
            return Err(InvalidInputError::NegativeBalance(self.initial_balance));
        }
        // (1 + r)^(1/12) is undefined at or below -100%
        if !self.annual_rate.is_finite() || self.annual_rate <= -1.0 {
            return Err(InvalidInputError::InvalidRate(self.annual_rate));
        }
        if !self.monthly_contribution.is_finite() {
            return Err(InvalidInputError::NonFinite {
                field: "monthly_contribution",
                value: self.monthly_contribution,
            });
        }
        self.horizon.months()?;
        Ok(())
    }

    /// Number of months to project past the opening row
    pub fn duration_months(&self) -> Result<u32, InvalidInputError> {
        self.horizon.months()
    }

    /// Start date normalized to the first of its month
    pub fn start_month(&self) -> NaiveDate {
        first_of_month(self.start_date)
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_horizon_from_parts() {
        assert_eq!(Horizon::from_parts(Some(18), None), Ok(Horizon::Months(18)));
        assert_eq!(Horizon::from_parts(None, Some(3)), Ok(Horizon::Years(3)));
        assert_eq!(
            Horizon::from_parts(None, None),
            Err(InvalidInputError::MissingDuration)
        );
        assert_eq!(
            Horizon::from_parts(Some(12), Some(1)),
            Err(InvalidInputError::AmbiguousDuration { months: 12, years: 1 })
        );
    }

    #[test]
    fn test_horizon_months() {
        assert_eq!(Horizon::Years(30).months(), Ok(360));
        assert_eq!(Horizon::Months(7).months(), Ok(7));
        assert_eq!(
            Horizon::Years(0).months(),
            Err(InvalidInputError::NonPositiveDuration(0))
        );
        assert_eq!(
            Horizon::Months(0).months(),
            Err(InvalidInputError::NonPositiveDuration(0))
        );
    }

    #[test]
    fn test_oversized_years_horizon_reports_years() {
        assert_eq!(
            Horizon::Years(400_000_000).months(),
            Err(InvalidInputError::HorizonOverflow { years: 400_000_000 })
        );
        // Largest year count that still fits
        assert_eq!(Horizon::Years(u32::MAX / 12).months(), Ok(u32::MAX / 12 * 12));
    }

    #[test]
    fn test_zero_balance_is_valid() {
        let input = ProjectionInput::new(0.0, 0.1, 100.0, Horizon::Years(1), date(2024, 1, 1));
        assert!(input.is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let start = date(2024, 1, 1);

        assert_eq!(
            ProjectionInput::new(100.0, -1.0, 0.0, Horizon::Months(12), start),
            Err(InvalidInputError::InvalidRate(-1.0))
        );
        assert!(matches!(
            ProjectionInput::new(100.0, f64::NAN, 0.0, Horizon::Months(12), start),
            Err(InvalidInputError::InvalidRate(_))
        ));
        assert_eq!(
            ProjectionInput::new(-5.0, 0.1, 0.0, Horizon::Months(12), start),
            Err(InvalidInputError::NegativeBalance(-5.0))
        );
        assert!(matches!(
            ProjectionInput::new(100.0, 0.1, f64::INFINITY, Horizon::Months(12), start),
            Err(InvalidInputError::NonFinite { field: "monthly_contribution", .. })
        ));
    }

    #[test]
    fn test_negative_rate_above_minus_one_is_valid() {
        let input = ProjectionInput::new(100.0, -0.5, 0.0, Horizon::Months(12), date(2024, 1, 1));
        assert!(input.is_ok());
    }

    #[test]
    fn test_start_month_normalized() {
        let input = ProjectionInput::new(0.0, 0.0, 0.0, Horizon::Months(1), date(2024, 3, 17)).unwrap();
        assert_eq!(input.start_month(), date(2024, 3, 1));
        assert_eq!(first_of_month(date(2023, 12, 31)), date(2023, 12, 1));
    }
}
