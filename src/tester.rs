//! The stationarity tester: validation pipeline around the ADF routine.
//!
//! [`evaluate`] is a pure function from a JSON-typed series to either a
//! [`TestResult`] or a classified [`ApiError`]; it holds no state between
//! invocations.

use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::adf::adf_test;
use crate::adf::ADFConfig;
use crate::adf::CriticalValues;
use crate::adf::DeterministicTerm;
use crate::adf::LagSelection;
use crate::error::ApiError;
use crate::error::ErrorKind;

/// Policy for one evaluation.
///
/// [`TestConfig::fixed`] is the single process-wide policy both deployments
/// of the original service shared: AIC autolag, constant-only regression,
/// five-observation minimum, 5% significance.
#[derive(Debug, Clone, Copy)]
pub struct TestConfig {
  /// Deterministic terms in the test regression.
  pub deterministic: DeterministicTerm,
  /// Lag-order selection strategy.
  pub lag_selection: LagSelection,
  /// Fewest observations accepted after cleaning.
  pub min_observations: usize,
  /// Significance level for the stationarity verdict.
  pub alpha: f64,
  /// Optional cap on the cleaned series length. Lag search cost grows with
  /// the input, so hosts exposed to untrusted callers can bound it here.
  pub max_observations: Option<usize>,
}

impl TestConfig {
  pub const fn fixed() -> Self {
    Self {
      deterministic: DeterministicTerm::Constant,
      lag_selection: LagSelection::Aic,
      min_observations: 5,
      alpha: 0.05,
      max_observations: None,
    }
  }
}

impl Default for TestConfig {
  fn default() -> Self {
    Self::fixed()
  }
}

/// Outcome of a successful stationarity test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
  /// ADF t-statistic.
  pub statistic: f64,
  /// MacKinnon p-value of the statistic.
  pub p_value: f64,
  /// Finite-sample critical values at 1%, 5%, 10%.
  pub critical_values: CriticalValues,
  /// `p_value < alpha`.
  pub is_stationary: bool,
}

/// Evaluate a raw series under the fixed process-wide policy.
pub fn evaluate(raw: &Value) -> Result<TestResult, ApiError> {
  evaluate_with(raw, TestConfig::fixed())
}

/// Evaluate a raw series under an explicit policy.
///
/// The pipeline runs in order and short-circuits on the first failure:
/// shape check, missing-value removal, emptiness check, minimum (and
/// optional maximum) size check, ADF computation, result shaping.
pub fn evaluate_with(raw: &Value, cfg: TestConfig) -> Result<TestResult, ApiError> {
  let items = raw.as_array().ok_or_else(|| {
    ApiError::new(
      ErrorKind::InvalidInput,
      "input must be a sequence of numeric or null values",
    )
  })?;

  let clean = clean_series(items)?;

  if clean.is_empty() {
    return Err(ApiError::new(
      ErrorKind::InsufficientData,
      "no valid data remained after dropping missing values",
    ));
  }
  if clean.len() < cfg.min_observations {
    return Err(ApiError::new(
      ErrorKind::InsufficientData,
      format!(
        "not enough observations ({}) for the ADF test; minimum required is {}",
        clean.len(),
        cfg.min_observations
      ),
    ));
  }
  if let Some(max) = cfg.max_observations {
    if clean.len() > max {
      return Err(ApiError::new(
        ErrorKind::InvalidInput,
        format!(
          "series has {} observations, exceeding the configured maximum of {max}",
          clean.len()
        ),
      ));
    }
  }

  let adf_cfg = ADFConfig {
    deterministic: cfg.deterministic,
    lag_selection: cfg.lag_selection,
    max_lags: None,
    alpha: cfg.alpha,
  };

  match adf_test(&clean, adf_cfg) {
    Ok(res) => {
      debug!(
        raw_len = items.len(),
        clean_len = clean.len(),
        used_lags = res.used_lags,
        statistic = res.statistic,
        p_value = res.p_value,
        "ADF evaluation finished"
      );
      Ok(TestResult {
        statistic: res.statistic,
        p_value: res.p_value,
        critical_values: res.critical_values,
        is_stationary: res.p_value < cfg.alpha,
      })
    }
    Err(err) => {
      warn!(clean_len = clean.len(), %err, "ADF computation failed");
      Err(ApiError::new(
        ErrorKind::ComputationFailure,
        format!("ADF computation failed: {err}"),
      ))
    }
  }
}

/// Drop nulls (and any NaN-valued numbers) while preserving order; reject
/// every other element type.
fn clean_series(items: &[Value]) -> Result<Vec<f64>, ApiError> {
  let mut clean = Vec::with_capacity(items.len());
  for (idx, item) in items.iter().enumerate() {
    match item {
      Value::Null => {}
      Value::Number(num) => match num.as_f64() {
        Some(v) if v.is_nan() => {}
        Some(v) => clean.push(v),
        None => {
          return Err(ApiError::new(
            ErrorKind::InvalidInput,
            format!("element at index {idx} is not representable as a float"),
          ));
        }
      },
      other => {
        return Err(ApiError::new(
          ErrorKind::InvalidInput,
          format!(
            "element at index {idx} is not numeric or null (got {})",
            json_type_name(other)
          ),
        ));
      }
    }
  }
  Ok(clean)
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
