//! Turning user-entered values into a projection input
//!
//! A request is "pending" until every required field is present. Zero is a
//! present value: an initial balance of 0 is ready, an absent one is not.

use crate::config::ProjectionConfig;
use crate::error::InvalidInputError;
use crate::projection::{Horizon, ProjectionInput};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Values as collected from a form, CLI flags or a JSON body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionRequest {
    pub initial_balance: Option<f64>,
    pub monthly_contribution: Option<f64>,
    /// Annual rate in percent (10.0 = 10% a year)
    pub annual_rate_percent: Option<f64>,
    pub duration_years: Option<u32>,
    pub duration_months: Option<u32>,
    /// Defaults to the configured start date policy
    pub start_date: Option<NaiveDate>,
}

/// Outcome of preparing a request
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    /// Required fields still missing; not an error
    Pending { missing: Vec<&'static str> },
    Ready(ProjectionInput),
}

impl ProjectionRequest {
    /// Names of required fields that have no value yet
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.initial_balance.is_none() {
            missing.push("initial_balance");
        }
        if self.monthly_contribution.is_none() {
            missing.push("monthly_contribution");
        }
        if self.annual_rate_percent.is_none() {
            missing.push("annual_rate_percent");
        }
        if self.duration_years.is_none() && self.duration_months.is_none() {
            missing.push("duration");
        }
        missing
    }

    /// Validate a complete request into a `ProjectionInput`.
    ///
    /// `today` is only read when the request has no start date.
    pub fn prepare(&self, config: &ProjectionConfig, today: NaiveDate) -> Result<Readiness, InvalidInputError> {
        let missing = self.missing_fields();
        let (Some(initial_balance), Some(monthly_contribution), Some(rate_percent), true) = (
            self.initial_balance,
            self.monthly_contribution,
            self.annual_rate_percent,
            missing.is_empty(),
        ) else {
            return Ok(Readiness::Pending { missing });
        };

        let horizon = Horizon::from_parts(self.duration_months, self.duration_years)?;
        let months = horizon.months()?;
        let max_months = config.max_duration_months();
        if months > max_months {
            return Err(InvalidInputError::DurationTooLong { months, max_months });
        }

        let start_date = match self.start_date {
            Some(date) => date,
            None => config.start_date_policy.resolve(today)?,
        };

        let input = ProjectionInput::new(
            initial_balance,
            rate_percent / 100.0,
            monthly_contribution,
            horizon,
            start_date,
        )?;
        Ok(Readiness::Ready(input))
    }
}
