//! Serverless-deployment wire schema.
//!
//! Request: `{ "series": [<number|null>, ...] }`.
//! Success: `{ "t_statistic", "p_value", "critical_values", "isStationary" }`.

use serde::Serialize;

use super::error_response;
use super::series_from_body;
use super::HttpResponse;
use crate::adf::CriticalValues;
use crate::tester::evaluate;
use crate::tester::TestResult;

pub const REQUEST_KEY: &str = "series";

#[derive(Debug, Serialize)]
struct SuccessBody {
  t_statistic: f64,
  p_value: f64,
  critical_values: CriticalValues,
  #[serde(rename = "isStationary")]
  is_stationary: bool,
}

impl From<TestResult> for SuccessBody {
  fn from(result: TestResult) -> Self {
    Self {
      t_statistic: result.statistic,
      p_value: result.p_value,
      critical_values: result.critical_values,
      is_stationary: result.is_stationary,
    }
  }
}

/// Handle one request body and produce the status and JSON to send back.
pub fn handle(body: &[u8]) -> HttpResponse {
  let series = match series_from_body(body, REQUEST_KEY) {
    Ok(series) => series,
    Err(err) => return error_response(&err),
  };
  match evaluate(&series) {
    Ok(result) => HttpResponse {
      status: 200,
      body: serde_json::to_string(&SuccessBody::from(result))
        .expect("success schema has no unserializable fields"),
    },
    Err(err) => error_response(&err),
  }
}
