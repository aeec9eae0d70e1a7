//! AWS Lambda handler for UPS vs NPS comparisons
//!
//! Accepts simulation inputs as JSON and returns the run summary, optionally
//! with the month-wise ledger and payout schedules.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use pension_system::career::MonthlyRecord;
use pension_system::pension::{NpsPayoutRow, UpsPayoutRow};
use pension_system::swp::SwpResult;
use pension_system::{RunSummary, ScenarioRunner, SimulationError, SimulationInputs};
use serde::{Deserialize, Serialize};

/// Request body: simulation inputs plus output switches
#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    #[serde(flatten)]
    pub inputs: SimulationInputs,

    /// Include the month-wise career ledger
    #[serde(default)]
    pub include_ledger: bool,

    /// Include UPS/NPS payout schedules and withdrawal plans
    #[serde(default)]
    pub include_schedules: bool,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub summary: RunSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<Vec<MonthlyRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ups_schedule: Option<Vec<UpsPayoutRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nps_schedule: Option<Vec<NpsPayoutRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nps_swp: Option<SwpResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ups_swp: Option<SwpResult>,
    pub execution_time_ms: u64,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &ComparisonResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(runner: &ScenarioRunner, event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ComparisonRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let report = match runner.run(&request.inputs) {
        Ok(report) => report,
        Err(SimulationError::Config(e)) => return error_response(400, &e.to_string()),
        Err(e) => return error_response(500, &e.to_string()),
    };

    let (ups_schedule, nps_schedule, nps_swp, ups_swp) = if request.include_schedules {
        (
            Some(report.pension.ups_schedule),
            Some(report.pension.nps_schedule),
            Some(report.nps_swp),
            Some(report.ups_swp),
        )
    } else {
        (None, None, None, None)
    };

    let response = ComparisonResponse {
        summary: report.summary,
        ledger: request.include_ledger.then_some(report.ledger.records),
        ups_schedule,
        nps_schedule,
        nps_swp,
        ups_swp,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = ScenarioRunner::builtin()?;
    let runner = &runner;

    run(service_fn(move |event: Request| async move { handler(runner, event).await })).await
}
