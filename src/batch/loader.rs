//! Scenario file loading
//!
//! One scenario per CSV row. Columns mirror `ProjectionRequest`; empty cells
//! are absent values. Cells are read as text and parsed per row, so a bad row
//! only spoils its own scenario.

use crate::error::{BatchError, InvalidInputError};
use crate::request::ProjectionRequest;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// A named projection request, or the reason its row could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub request: Result<ProjectionRequest, InvalidInputError>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    id: String,
    #[serde(default)]
    initial_balance: Option<String>,
    #[serde(default)]
    monthly_contribution: Option<String>,
    #[serde(default)]
    annual_rate_percent: Option<String>,
    #[serde(default)]
    duration_years: Option<String>,
    #[serde(default)]
    duration_months: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
}

impl ScenarioRecord {
    fn request(&self) -> Result<ProjectionRequest, InvalidInputError> {
        Ok(ProjectionRequest {
            initial_balance: parse_cell("initial_balance", &self.initial_balance)?,
            monthly_contribution: parse_cell("monthly_contribution", &self.monthly_contribution)?,
            annual_rate_percent: parse_cell("annual_rate_percent", &self.annual_rate_percent)?,
            duration_years: parse_duration("duration_years", &self.duration_years)?,
            duration_months: parse_duration("duration_months", &self.duration_months)?,
            start_date: parse_cell::<NaiveDate>("start_date", &self.start_date)?,
        })
    }
}

fn parse_cell<T: FromStr>(field: &'static str, cell: &Option<String>) -> Result<Option<T>, InvalidInputError> {
    match cell.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| InvalidInputError::Unparseable {
            field,
            value: text.to_string(),
        }),
    }
}

fn parse_duration(field: &'static str, cell: &Option<String>) -> Result<Option<u32>, InvalidInputError> {
    let Some(value) = parse_cell::<i64>(field, cell)? else {
        return Ok(None);
    };
    if value < 0 {
        return Err(InvalidInputError::NegativeDuration { field, value });
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| InvalidInputError::Unparseable {
            field,
            value: value.to_string(),
        })
}

/// Load scenarios from a CSV file
pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<Scenario>, BatchError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let scenarios = load_scenarios_from_reader(file)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any CSV reader.
///
/// Only I/O failures and an unreadable header fail the whole file.
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    rdr.headers()?;

    let mut scenarios = Vec::new();
    for (index, result) in rdr.deserialize::<ScenarioRecord>().enumerate() {
        let scenario = match result {
            Ok(record) => Scenario {
                request: record.request(),
                id: record.id,
            },
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                // Header is line 1
                let line = err.position().map_or(index as u64 + 2, |pos| pos.line());
                warn!("Unreadable scenario row at line {}: {}", line, err);
                Scenario {
                    id: format!("line {}", line),
                    request: Err(InvalidInputError::MalformedRow {
                        line,
                        reason: err.to_string(),
                    }),
                }
            }
        };
        scenarios.push(scenario);
    }
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIOS: &str = "\
id,initial_balance,monthly_contribution,annual_rate_percent,duration_years,duration_months,start_date
retirement,1000,100,10,10,,2024-01-01
short,0,250,12,,18,
draft,,100,,,,
";

    #[test]
    fn test_load_scenarios() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 3);

        let retirement = scenarios[0].request.as_ref().unwrap();
        assert_eq!(scenarios[0].id, "retirement");
        assert_eq!(retirement.duration_years, Some(10));
        assert_eq!(retirement.duration_months, None);
        assert_eq!(retirement.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));

        let short = scenarios[1].request.as_ref().unwrap();
        assert_eq!(short.initial_balance, Some(0.0));
        assert_eq!(short.duration_months, Some(18));
        assert_eq!(short.start_date, None);

        let draft = scenarios[2].request.as_ref().unwrap();
        assert_eq!(draft.initial_balance, None);
        assert_eq!(draft.missing_fields().len(), 3);
    }

    #[test]
    fn test_bad_rows_stay_with_their_scenario() {
        let data = "\
id,initial_balance,monthly_contribution,annual_rate_percent,duration_years,duration_months,start_date
good,1000,100,10,10,,2024-01-01
neg,1000,100,10,,-12,2024-01-01
text,abc,100,10,1,,
when,1000,100,10,1,,someday
";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 4);

        assert!(scenarios[0].request.is_ok());
        assert_eq!(scenarios[1].id, "neg");
        assert_eq!(
            scenarios[1].request,
            Err(InvalidInputError::NegativeDuration { field: "duration_months", value: -12 })
        );
        assert_eq!(
            scenarios[2].request,
            Err(InvalidInputError::Unparseable { field: "initial_balance", value: "abc".to_string() })
        );
        assert!(matches!(
            scenarios[3].request,
            Err(InvalidInputError::Unparseable { field: "start_date", .. })
        ));
    }

    #[test]
    fn test_short_row_is_read_with_missing_cells() {
        let data = "id,initial_balance,monthly_contribution,annual_rate_percent,duration_years\nshort,5,1\n";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();

        let request = scenarios[0].request.as_ref().unwrap();
        assert_eq!(request.initial_balance, Some(5.0));
        assert_eq!(request.annual_rate_percent, None);
        assert_eq!(request.duration_years, None);
    }

    #[test]
    fn test_duration_too_large_for_u32() {
        let data = "id,duration_months\nhuge,99999999999\n";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert!(matches!(
            scenarios[0].request,
            Err(InvalidInputError::Unparseable { field: "duration_months", .. })
        ));
    }
}
