//! AWS Lambda handler for fund projections
//!
//! Accepts an investment as JSON and returns the projection. Rates come from the
//! request body when given, otherwise from the pool API.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::time::Instant;

use fund_projection::rates::{HttpRateClient, RateSource};
use fund_projection::{ClientConfig, Frequency, ProjectionCalculator, ProjectionInput, ProjectionResult, RateTable};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Input for one projection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Amount invested (default: 0)
    #[serde(default)]
    pub amount: f64,

    /// Weekly, Monthly or Yearly (default: Weekly)
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,

    /// Duration in years, 1-10 (default: 1)
    #[serde(default = "default_duration_years")]
    pub duration_years: u32,

    /// Pool to fetch rates for (default: configured pool)
    #[serde(default)]
    pub pool_id: Option<u32>,

    /// Inline rates; skips the API fetch
    #[serde(default)]
    pub rates: Option<RateTable>,
}

fn default_frequency() -> Frequency { Frequency::Weekly }
fn default_duration_years() -> u32 { 1 }

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RatesOrigin {
    Request,
    Api,
    Unavailable,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub result: ProjectionResult,
    pub pool_id: u32,
    pub rates_origin: RatesOrigin,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &CalculateResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler<S>(source: &S, default_pool_id: u32, event: Request) -> Result<Response<Body>, Error>
where
    S: RateSource + ?Sized,
{
    let start = Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculateRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    // Validate before touching the network
    let input = match ProjectionInput::new(request.amount, request.frequency, request.duration_years, RateTable::empty()) {
        Ok(input) => input,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let pool_id = request.pool_id.unwrap_or(default_pool_id);

    // Inline rates win; a failed fetch leaves every rate absent
    let (rates, rates_origin) = match request.rates {
        Some(table) => (table, RatesOrigin::Request),
        None => match source.calculator_details(pool_id).await {
            Ok(table) => (table, RatesOrigin::Api),
            Err(e) => {
                log::error!("Error fetching pool details: {}", e);
                (RateTable::empty(), RatesOrigin::Unavailable)
            }
        },
    };

    let result = ProjectionCalculator::new().compute(&input.with_rates(rates));

    json_response(&CalculateResponse {
        result,
        pool_id,
        rates_origin,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let client = HttpRateClient::new(ClientConfig::from_env());
    let pool_id = client.config().pool_id;
    let client = &client;

    run(service_fn(move |event: Request| async move { handler(client, pool_id, event).await })).await
}
