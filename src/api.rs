//! Boundary adapters for the two observed deployments of the service.
//!
//! The original system shipped twice with the same core logic but different
//! wire schemas; the adapters keep both schemas intact instead of silently
//! merging them. Each adapter is a pure `bytes -> HttpResponse` function:
//! routing, CORS, and process lifecycle stay with the host.
//!
//! | adapter      | request key   | success fields                                             |
//! |--------------|---------------|------------------------------------------------------------|
//! | [`serverless`] | `series`      | `t_statistic`, `p_value`, `critical_values`, `isStationary` |
//! | [`backend`]    | `time_series` | `statistic`, `p_value`, `critical_values`, `is_stationary`  |
//!
//! Both adapters serialize failures as `{ "kind", "message" }` with the
//! status mapping from [`ErrorKind::http_status`](crate::error::ErrorKind).

pub mod backend;
pub mod serverless;

use serde_json::json;
use serde_json::Value;

use crate::error::ApiError;
use crate::error::ErrorKind;

/// Status code and JSON body, ready for any HTTP host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub body: String,
}

pub(crate) fn error_response(err: &ApiError) -> HttpResponse {
  HttpResponse {
    status: err.kind.http_status(),
    body: json!({ "kind": err.kind, "message": err.message }).to_string(),
  }
}

/// Parse the request body and extract the series under `key`.
pub(crate) fn series_from_body(body: &[u8], key: &str) -> Result<Value, ApiError> {
  let mut value: Value = serde_json::from_slice(body).map_err(|err| {
    ApiError::new(
      ErrorKind::MalformedPayload,
      format!("invalid JSON in request body: {err}"),
    )
  })?;
  match value.get_mut(key) {
    Some(series) => Ok(series.take()),
    None => Err(ApiError::new(
      ErrorKind::MalformedPayload,
      format!("missing '{key}' in request body"),
    )),
  }
}
