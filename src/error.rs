//! Error types for projection input, configuration and batch loading

use chrono::NaiveDate;
use thiserror::Error;

/// Input contract violations. Raised before any month is projected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("No duration given: supply either months or years")]
    MissingDuration,

    #[error("Ambiguous duration: got both {months} months and {years} years")]
    AmbiguousDuration { months: u32, years: u32 },

    #[error("Duration must be a positive number of months, got {0}")]
    NonPositiveDuration(u32),

    #[error("Field `{field}` must not be negative, got {value}")]
    NegativeDuration { field: &'static str, value: i64 },

    #[error("Duration of {years} years does not fit in a month count")]
    HorizonOverflow { years: u32 },

    #[error("Field `{field}` has an unreadable value `{value}`")]
    Unparseable { field: &'static str, value: String },

    #[error("Unreadable row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Duration of {months} months exceeds the {max_months} month horizon")]
    DurationTooLong { months: u32, max_months: u32 },

    #[error("Annual rate must be finite and greater than -1, got {0}")]
    InvalidRate(f64),

    #[error("Initial balance must be zero or positive, got {0}")]
    NegativeBalance(f64),

    #[error("Field `{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Month {offset} after {start} is outside the supported calendar")]
    DateOverflow { start: NaiveDate, offset: u32 },
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_duration_years must be between 1 and {max}, got {got}")]
    InvalidHorizon { got: u32, max: u32 },

    #[error("Currency symbol must not be empty")]
    EmptyCurrencySymbol,
}

/// Errors raised while loading or writing a batch of scenarios
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to open scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed scenario file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Scenario `{id}` is missing required fields: {}", .missing.join(", "))]
    Incomplete { id: String, missing: Vec<&'static str> },

    #[error("Scenario `{id}` is invalid: {source}")]
    Invalid {
        id: String,
        #[source]
        source: InvalidInputError,
    },
}
