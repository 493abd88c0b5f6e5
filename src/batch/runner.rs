//! Parallel projection of many scenarios

use super::Scenario;
use crate::config::ProjectionConfig;
use crate::error::BatchError;
use crate::projection::ProjectionEngine;
use crate::report::{MoneyFormat, ProjectionSummary};
use crate::request::Readiness;
use chrono::NaiveDate;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;

/// Result of projecting one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub id: String,
    pub result: Result<ProjectionSummary, BatchError>,
}

/// Project every scenario, in input order.
///
/// Scenarios are independent, so they run across the rayon pool. A bad
/// scenario produces an error outcome and does not stop the rest.
pub fn run_scenarios(
    scenarios: &[Scenario],
    config: &ProjectionConfig,
    today: NaiveDate,
) -> Vec<ScenarioOutcome> {
    let engine = ProjectionEngine::new();

    let outcomes: Vec<ScenarioOutcome> = scenarios
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            id: scenario.id.clone(),
            result: run_scenario(&engine, scenario, config, today),
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(
        "Projected {} scenarios ({} failed)",
        outcomes.len() - failed,
        failed
    );
    outcomes
}

fn run_scenario(
    engine: &ProjectionEngine,
    scenario: &Scenario,
    config: &ProjectionConfig,
    today: NaiveDate,
) -> Result<ProjectionSummary, BatchError> {
    let invalid = |source| BatchError::Invalid {
        id: scenario.id.clone(),
        source,
    };

    let request = scenario.request.as_ref().map_err(|err| invalid(err.clone()))?;
    let input = match request.prepare(config, today).map_err(invalid)? {
        Readiness::Ready(input) => input,
        Readiness::Pending { missing } => {
            warn!("Skipping scenario `{}`: missing {}", scenario.id, missing.join(", "));
            return Err(BatchError::Incomplete {
                id: scenario.id.clone(),
                missing,
            });
        }
    };

    let series = engine.project(&input).map_err(invalid)?;
    Ok(ProjectionSummary::new(&input, &series))
}

const SUMMARY_HEADER: [&str; 8] = [
    "id",
    "status",
    "start_month",
    "end_month",
    "final_value",
    "total_invested",
    "total_interest",
    "error",
];

#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    id: &'a str,
    status: &'static str,
    start_month: Option<String>,
    end_month: Option<String>,
    final_value: Option<String>,
    total_invested: Option<String>,
    total_interest: Option<String>,
    error: Option<String>,
}

/// Write a header and one CSV line per outcome.
///
/// With a `MoneyFormat` the amounts are currency strings, otherwise they are
/// rounded to cents.
pub fn write_summary_csv<W: Write>(
    outcomes: &[ScenarioOutcome],
    writer: W,
    money: Option<&MoneyFormat>,
) -> Result<(), BatchError> {
    let amount = |value: f64| match money {
        Some(money) => money.format(value),
        None => format!("{:.2}", value),
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(SUMMARY_HEADER)?;
    for outcome in outcomes {
        let record = match &outcome.result {
            Ok(summary) => SummaryRecord {
                id: &outcome.id,
                status: "ok",
                start_month: Some(summary.start_month.format("%Y-%m").to_string()),
                end_month: Some(summary.end_month.format("%Y-%m").to_string()),
                final_value: Some(amount(summary.final_value)),
                total_invested: Some(amount(summary.total_invested)),
                total_interest: Some(amount(summary.total_interest)),
                error: None,
            },
            Err(err) => SummaryRecord {
                id: &outcome.id,
                status: match err {
                    BatchError::Incomplete { .. } => "pending",
                    _ => "invalid",
                },
                start_month: None,
                end_month: None,
                final_value: None,
                total_invested: None,
                total_interest: None,
                error: Some(err.to_string()),
            },
        };
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::load_scenarios_from_reader;
    use crate::error::InvalidInputError;

    const SCENARIOS: &str = "\
id,initial_balance,monthly_contribution,annual_rate_percent,duration_years,duration_months,start_date
retirement,1000,100,10,10,,2024-01-01
flat,1000,0,0,,24,2024-01-01
draft,,100,,,,
broken,100,10,-150,1,,
";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_run_scenarios_keeps_order_and_isolates_failures() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).unwrap();
        let outcomes = run_scenarios(&scenarios, &ProjectionConfig::default(), today());

        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["retirement", "flat", "draft", "broken"]);

        let retirement = outcomes[0].result.as_ref().unwrap();
        assert!((retirement.final_value - 22_580.13).abs() < 0.01);

        let flat = outcomes[1].result.as_ref().unwrap();
        assert_eq!(flat.final_value, 1000.0);
        assert_eq!(flat.total_interest, 0.0);

        assert!(matches!(outcomes[2].result, Err(BatchError::Incomplete { .. })));
        assert!(matches!(outcomes[3].result, Err(BatchError::Invalid { .. })));
    }

    #[test]
    fn test_summary_csv() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).unwrap();
        let outcomes = run_scenarios(&scenarios, &ProjectionConfig::default(), today());

        let mut buf = Vec::new();
        write_summary_csv(&outcomes, &mut buf, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "id,status,start_month,end_month,final_value,total_invested,total_interest,error"
        );
        assert_eq!(lines[1], "retirement,ok,2024-01,2034-01,22580.13,13000.00,9580.13,");
        assert_eq!(lines[2], "flat,ok,2024-01,2026-01,1000.00,1000.00,0.00,");
        assert!(lines[3].starts_with("draft,pending,,,,,,"));
        assert!(lines[4].starts_with("broken,invalid,,,,,,"));
    }

    #[test]
    fn test_unreadable_row_does_not_stop_good_row() {
        let data = "\
id,initial_balance,monthly_contribution,annual_rate_percent,duration_years,duration_months,start_date
good,1000,100,10,10,,2024-01-01
neg,1000,100,10,,-12,2024-01-01
text,1000,lots,10,1,,
";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        let outcomes = run_scenarios(&scenarios, &ProjectionConfig::default(), today());
        assert_eq!(outcomes.len(), 3);

        let good = outcomes[0].result.as_ref().unwrap();
        assert!((good.final_value - 22_580.13).abs() < 0.01);

        assert_eq!(outcomes[1].id, "neg");
        assert!(matches!(
            &outcomes[1].result,
            Err(BatchError::Invalid {
                id,
                source: InvalidInputError::NegativeDuration { value: -12, .. },
            }) if id == "neg"
        ));
        assert!(matches!(
            &outcomes[2].result,
            Err(BatchError::Invalid {
                source: InvalidInputError::Unparseable { field: "monthly_contribution", .. },
                ..
            })
        ));
    }

    #[test]
    fn test_empty_summary_still_has_header() {
        let mut buf = Vec::new();
        write_summary_csv(&[], &mut buf, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "id,status,start_month,end_month,final_value,total_invested,total_interest,error\n"
        );
    }
}
