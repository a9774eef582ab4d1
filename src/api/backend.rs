//! Web-framework-deployment wire schema.
//!
//! Request: `{ "time_series": [<number|null>, ...] }`.
//! Success: `{ "statistic", "p_value", "critical_values", "is_stationary" }`.

use serde::Serialize;

use super::error_response;
use super::series_from_body;
use super::HttpResponse;
use crate::adf::CriticalValues;
use crate::tester::evaluate;
use crate::tester::TestResult;

pub const REQUEST_KEY: &str = "time_series";

#[derive(Debug, Serialize)]
struct SuccessBody {
  statistic: f64,
  p_value: f64,
  critical_values: CriticalValues,
  is_stationary: bool,
}

impl From<TestResult> for SuccessBody {
  fn from(result: TestResult) -> Self {
    Self {
      statistic: result.statistic,
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

#[cfg(test)]
mod tests {
  use serde_json::json;
  use serde_json::Value;

  use super::*;

  #[test]
  fn valid_series_yields_ok_with_snake_case_fields() {
    let xs: Vec<f64> = (0..60).map(|i| ((i * 29 + 7) % 101) as f64 / 40.0 - 1.2).collect();
    let resp = handle(json!({ "time_series": xs }).to_string().as_bytes());
    assert_eq!(resp.status, 200);

    let body: Value = serde_json::from_str(&resp.body).unwrap();
    assert!(body["statistic"].is_f64());
    assert!(body["is_stationary"].is_boolean());
    assert!(body.get("isStationary").is_none());
    assert!(body["critical_values"]["1%"].is_f64());
  }

  #[test]
  fn missing_time_series_key_is_a_malformed_payload() {
    let resp = handle(b"{\"series\": [1, 2, 3, 4, 5, 6]}");
    assert_eq!(resp.status, 400);
    let body: Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(body["kind"], "malformed_payload");
    assert!(body["message"].as_str().unwrap().contains("'time_series'"));
  }

  #[test]
  fn nulls_are_cleaned_before_validation() {
    let resp = handle(json!({ "time_series": [null, 1, 2] }).to_string().as_bytes());
    assert_eq!(resp.status, 400);
    let body: Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(body["kind"], "insufficient_data");
    assert!(body["message"].as_str().unwrap().contains("(2)"));
  }

  #[test]
  fn both_adapters_share_one_validation_policy() {
    let series = json!([1, 2, 3]);
    let here = handle(json!({ "time_series": series.clone() }).to_string().as_bytes());
    let there =
      super::super::serverless::handle(json!({ "series": series }).to_string().as_bytes());
    assert_eq!(here.status, 400);
    assert_eq!(there.status, 400);

    let here: Value = serde_json::from_str(&here.body).unwrap();
    let there: Value = serde_json::from_str(&there.body).unwrap();
    assert_eq!(here["kind"], there["kind"]);
    assert_eq!(here["message"], there["message"]);
  }
}
