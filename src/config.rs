//! Projection settings loaded from an optional JSON file

use crate::error::{ConfigError, InvalidInputError};
use crate::projection::{first_of_month, MAX_HORIZON_YEARS, MONTHS_PER_YEAR};
use crate::report::{Locale, MoneyFormat};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Start date used when a request does not name one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartDatePolicy {
    /// First day of the month after `today`
    #[default]
    FirstOfNextMonth,
    /// First day of the month containing `today`
    CurrentMonth,
}

impl StartDatePolicy {
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate, InvalidInputError> {
        let current = first_of_month(today);
        match self {
            StartDatePolicy::CurrentMonth => Ok(current),
            StartDatePolicy::FirstOfNextMonth => current
                .checked_add_months(Months::new(1))
                .ok_or(InvalidInputError::DateOverflow { start: current, offset: 1 }),
        }
    }
}

/// Settings shared by every projection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default)]
    pub start_date_policy: StartDatePolicy,

    /// Longest horizon a request may ask for, in years
    #[serde(default = "default_max_duration_years")]
    pub max_duration_years: u32,

    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_max_duration_years() -> u32 { MAX_HORIZON_YEARS }
fn default_currency_symbol() -> String { "R$".to_string() }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            start_date_policy: StartDatePolicy::default(),
            max_duration_years: MAX_HORIZON_YEARS,
            locale: Locale::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl ProjectionConfig {
    /// Load and validate a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_duration_years == 0 || self.max_duration_years > MAX_HORIZON_YEARS {
            return Err(ConfigError::InvalidHorizon {
                got: self.max_duration_years,
                max: MAX_HORIZON_YEARS,
            });
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::EmptyCurrencySymbol);
        }
        Ok(())
    }

    pub fn max_duration_months(&self) -> u32 {
        self.max_duration_years * MONTHS_PER_YEAR
    }

    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::new(self.currency_symbol.clone(), self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_date_policies() {
        let today = date(2024, 12, 19);
        assert_eq!(StartDatePolicy::FirstOfNextMonth.resolve(today), Ok(date(2025, 1, 1)));
        assert_eq!(StartDatePolicy::CurrentMonth.resolve(today), Ok(date(2024, 12, 1)));
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config = ProjectionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ProjectionConfig::default());
        assert_eq!(config.max_duration_months(), 1200);
        assert_eq!(config.money_format(), MoneyFormat::brl());
    }

    #[test]
    fn test_partial_json() {
        let config = ProjectionConfig::from_json_str(
            r#"{"start_date_policy": "current_month", "locale": "en_us", "currency_symbol": "$"}"#,
        )
        .unwrap();
        assert_eq!(config.start_date_policy, StartDatePolicy::CurrentMonth);
        assert_eq!(config.max_duration_years, 100);
        assert_eq!(config.money_format().format(1500.0), "$1,500.00");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ProjectionConfig::from_json_str(r#"{"max_duration_years": 0}"#),
            Err(ConfigError::InvalidHorizon { got: 0, .. })
        ));
        assert!(matches!(
            ProjectionConfig::from_json_str(r#"{"currency_symbol": " "}"#),
            Err(ConfigError::EmptyCurrencySymbol)
        ));
        assert!(matches!(
            ProjectionConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
