//! HTTP function serving projections
//!
//! POST a JSON `ProjectionRequest`; the response carries the summary, the
//! composition, the annual snapshots and every monthly row. Incomplete
//! requests get a `202` with a `pending` body listing what is missing;
//! malformed or invalid ones get a `400`.
//!
//! Set `PROJECTION_CONFIG` to a JSON config file to override the defaults.

use chrono::Local;
use compound_projection::{
    report::{annual_snapshots, AnnualSnapshot, Composition},
    ProjectionConfig, ProjectionEngine, ProjectionRequest, ProjectionSeries, ProjectionSummary, Readiness,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ProjectionResponse {
    Ready {
        summary: ProjectionSummary,
        narrative: String,
        composition: Composition,
        annual: Vec<AnnualSnapshot>,
        series: ProjectionSeries,
    },
    Pending {
        missing: Vec<&'static str>,
    },
    Invalid {
        error: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = match std::env::var("PROJECTION_CONFIG") {
        Ok(path) => {
            info!("Loading config from {}", path);
            ProjectionConfig::from_json_file(&path)?
        }
        Err(_) => ProjectionConfig::default(),
    };
    let config = Arc::new(config);

    run(service_fn(move |event: Request| {
        let config = Arc::clone(&config);
        async move { handle(&event, &config) }
    }))
    .await
}

fn handle(event: &Request, config: &ProjectionConfig) -> Result<Response<Body>, Error> {
    let request: ProjectionRequest = match serde_json::from_slice(event.body()) {
        Ok(request) => request,
        Err(err) => {
            warn!("Rejected malformed request body: {}", err);
            return json_response(400, &ProjectionResponse::Invalid { error: err.to_string() });
        }
    };

    let today = Local::now().date_naive();
    let input = match request.prepare(config, today) {
        Ok(Readiness::Ready(input)) => input,
        Ok(Readiness::Pending { missing }) => {
            return json_response(202, &ProjectionResponse::Pending { missing });
        }
        Err(err) => {
            return json_response(400, &ProjectionResponse::Invalid { error: err.to_string() });
        }
    };

    let series = match ProjectionEngine::new().project(&input) {
        Ok(series) => series,
        Err(err) => {
            return json_response(400, &ProjectionResponse::Invalid { error: err.to_string() });
        }
    };

    let summary = ProjectionSummary::new(&input, &series);
    let response = ProjectionResponse::Ready {
        narrative: summary.narrative(&config.money_format()),
        composition: summary.composition(),
        annual: annual_snapshots(&series),
        summary,
        series,
    };
    json_response(200, &response)
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let payload = serde_json::to_string(body)?;
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::Text(payload))?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn call(body: &str) -> (u16, Value) {
        let event = Request::new(Body::from(body));
        let response = handle(&event, &ProjectionConfig::default()).unwrap();
        let json: Value = serde_json::from_slice(response.body()).unwrap();
        (response.status().as_u16(), json)
    }

    #[test]
    fn test_complete_request() {
        let (status, body) = call(
            r#"{"initial_balance": 1000, "monthly_contribution": 100, "annual_rate_percent": 10,
                "duration_years": 10, "start_date": "2024-01-01"}"#,
        );
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["series"]["rows"].as_array().unwrap().len(), 121);
        assert_eq!(body["annual"].as_array().unwrap().len(), 11);
        let final_value = body["summary"]["final_value"].as_f64().unwrap();
        assert!((final_value - 22_580.13).abs() < 0.01);
    }

    #[test]
    fn test_incomplete_request_is_pending() {
        let (status, body) = call(r#"{"initial_balance": 0, "duration_months": 12}"#);
        assert_eq!(status, 202);
        assert_eq!(body["status"], "pending");
        assert_eq!(
            body["missing"],
            serde_json::json!(["monthly_contribution", "annual_rate_percent"])
        );
    }

    #[test]
    fn test_invalid_rate() {
        let (status, body) = call(
            r#"{"initial_balance": 100, "monthly_contribution": 10, "annual_rate_percent": -150,
                "duration_years": 1, "start_date": "2024-01-01"}"#,
        );
        assert_eq!(status, 400);
        assert_eq!(body["status"], "invalid");
        assert!(body["error"].as_str().unwrap().contains("-1.5"));
    }

    #[test]
    fn test_malformed_body() {
        let (status, body) = call("{not json");
        assert_eq!(status, 400);
        assert_eq!(body["status"], "invalid");
    }
}
