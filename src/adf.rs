//! Augmented Dickey-Fuller unit-root test with automatic lag selection.

mod mackinnon;
mod ols;

use thiserror::Error;

pub use mackinnon::CriticalValues;

use ols::choose_lag;
use ols::fit_adf;
use ols::schwert_max_lags;
use ols::validate_series;

/// Smallest sample the ADF regression accepts.
///
/// Below this the design matrix leaves no degrees of freedom for the
/// intercept and lagged-level coefficient.
pub const MIN_SAMPLE: usize = 5;

/// Deterministic terms included in the test regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeterministicTerm {
  None,
  Constant,
  ConstantTrend,
}

/// Lag-order selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LagSelection {
  Fixed(usize),
  Aic,
  Bic,
}

/// Failure modes of the ADF routine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ADFError {
  #[error("series contains a non-finite value ({0})")]
  NonFinite(f64),
  #[error("series has {n} observations; at least {min} are required")]
  SampleTooSmall { n: usize, min: usize },
  #[error("ADF regression has {nobs} usable observations for {params} parameters")]
  InsufficientSample { nobs: usize, params: usize },
  #[error("ADF regression design matrix is singular")]
  SingularDesign,
  #[error("ADF regression has zero residual variance; the t-statistic is undefined")]
  DegenerateRegression,
  #[error("invalid ADF configuration: {0}")]
  InvalidConfig(String),
}

/// Configuration for the Augmented Dickey-Fuller unit-root test.
#[derive(Debug, Clone, Copy)]
pub struct ADFConfig {
  /// Deterministic terms included in the test regression.
  pub deterministic: DeterministicTerm,
  /// Lag-order selection strategy.
  pub lag_selection: LagSelection,
  /// Maximum lag considered by automatic lag selection.
  pub max_lags: Option<usize>,
  /// Significance level used to compute `reject_unit_root`.
  pub alpha: f64,
}

impl Default for ADFConfig {
  fn default() -> Self {
    Self {
      deterministic: DeterministicTerm::Constant,
      lag_selection: LagSelection::Aic,
      max_lags: None,
      alpha: 0.05,
    }
  }
}

/// Result of the Augmented Dickey-Fuller test.
#[derive(Debug, Clone, Copy)]
pub struct ADFResult {
  /// ADF t-statistic for the lagged level coefficient.
  pub statistic: f64,
  /// MacKinnon response-surface p-value of `statistic`.
  pub p_value: f64,
  /// Selected lag order.
  pub used_lags: usize,
  /// Number of regression observations used by the fitted model.
  pub nobs: usize,
  /// Finite-sample critical values at 1%, 5%, 10% levels.
  pub critical_values: CriticalValues,
  /// Whether the null (unit root) is rejected at `alpha`.
  pub reject_unit_root: bool,
}

/// Augmented Dickey-Fuller unit-root test.
///
/// Invalid inputs and degenerate regressions are reported via [`ADFError`];
/// the routine never panics on caller data.
pub fn adf_test(y: &[f64], cfg: ADFConfig) -> Result<ADFResult, ADFError> {
  validate_series(y, MIN_SAMPLE)?;
  if !(cfg.alpha > 0.0 && cfg.alpha < 1.0) {
    return Err(ADFError::InvalidConfig(format!(
      "alpha must be in (0, 1), got {}",
      cfg.alpha
    )));
  }

  let max_possible_lag = y.len().saturating_sub(MIN_SAMPLE);
  let max_lags = cfg
    .max_lags
    .unwrap_or_else(|| schwert_max_lags(y.len()))
    .min(max_possible_lag);

  let used_lags = match cfg.lag_selection {
    LagSelection::Fixed(p) => {
      if p > max_possible_lag {
        return Err(ADFError::InvalidConfig(format!(
          "fixed lag order {p} too large for sample of {}",
          y.len()
        )));
      }
      p
    }
    _ => choose_lag(y, cfg.deterministic, cfg.lag_selection, max_lags)?,
  };

  let fit = fit_adf(y, used_lags, cfg.deterministic)?;
  let p_value = mackinnon::p_value(fit.statistic, cfg.deterministic);
  let critical_values = mackinnon::critical_values(cfg.deterministic, fit.nobs);

  Ok(ADFResult {
    statistic: fit.statistic,
    p_value,
    used_lags,
    nobs: fit.nobs,
    critical_values,
    reject_unit_root: p_value < cfg.alpha,
  })
}
