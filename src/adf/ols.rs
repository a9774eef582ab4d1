//! OLS machinery for the ADF regression: design construction, lag scoring,
//! and the t-statistic on the lagged-level coefficient.

use nalgebra::DMatrix;
use nalgebra::DVector;

use super::ADFError;
use super::DeterministicTerm;
use super::LagSelection;

/// Relative SSE threshold below which the regression counts as an exact fit.
const EXACT_FIT_REL_TOL: f64 = 1e-24;

/// Absolute threshold under which an exact-fit level coefficient is zero.
const ZERO_GAMMA_TOL: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct OlsFit {
  pub beta: Vec<f64>,
  pub std_err: Vec<f64>,
  pub sse: f64,
  pub nobs: usize,
  pub k: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct AdfFit {
  pub statistic: f64,
  pub nobs: usize,
}

pub fn validate_series(y: &[f64], min_n: usize) -> Result<(), ADFError> {
  if y.len() < min_n {
    return Err(ADFError::SampleTooSmall {
      n: y.len(),
      min: min_n,
    });
  }
  if let Some(&bad) = y.iter().find(|v| !v.is_finite()) {
    return Err(ADFError::NonFinite(bad));
  }
  Ok(())
}

pub fn difference(y: &[f64]) -> Vec<f64> {
  y.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Schwert's rule of thumb for the maximal lag order.
pub fn schwert_max_lags(n: usize) -> usize {
  if n <= 1 {
    return 0;
  }
  (12.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize
}

pub fn ols(y: &[f64], x: &[Vec<f64>]) -> Result<OlsFit, ADFError> {
  let n = y.len();
  let k = x.first().map_or(0, Vec::len);
  debug_assert!(n > 0 && k > 0 && y.len() == x.len());
  if n <= k {
    return Err(ADFError::InsufficientSample { nobs: n, params: k });
  }

  let mut flat_x = Vec::with_capacity(n * k);
  for row in x {
    flat_x.extend_from_slice(row);
  }

  let x_mat = DMatrix::from_row_slice(n, k, &flat_x);
  let y_vec = DVector::from_row_slice(y);

  let xtx = x_mat.transpose() * &x_mat;
  let Some(xtx_inv) = xtx.try_inverse() else {
    return Err(ADFError::SingularDesign);
  };

  let beta = &xtx_inv * x_mat.transpose() * &y_vec;
  let fitted = &x_mat * &beta;
  let residuals = y_vec - fitted;

  let sse = residuals.iter().map(|u| u * u).sum::<f64>();
  let dof = (n - k) as f64;
  let sigma2 = (sse / dof).max(0.0);

  let cov = xtx_inv * sigma2;
  let mut std_err = vec![0.0; k];
  for i in 0..k {
    std_err[i] = cov[(i, i)].max(0.0).sqrt();
  }

  Ok(OlsFit {
    beta: beta.iter().copied().collect(),
    std_err,
    sse,
    nobs: n,
    k,
  })
}

fn build_adf_design(
  y: &[f64],
  lags: usize,
  det: DeterministicTerm,
) -> Result<(Vec<f64>, Vec<Vec<f64>>, usize), ADFError> {
  let dy = difference(y);
  let n_dy = dy.len();
  if n_dy <= lags + 1 {
    return Err(ADFError::InsufficientSample {
      nobs: n_dy.saturating_sub(lags),
      params: lags + 2,
    });
  }

  let width = match det {
    DeterministicTerm::None => 1 + lags,
    DeterministicTerm::Constant => 2 + lags,
    DeterministicTerm::ConstantTrend => 3 + lags,
  };

  let mut lhs = Vec::with_capacity(n_dy - lags);
  let mut rhs = Vec::with_capacity(n_dy - lags);

  for t in lags..n_dy {
    lhs.push(dy[t]);

    let mut row = Vec::with_capacity(width);
    match det {
      DeterministicTerm::None => {}
      DeterministicTerm::Constant => row.push(1.0),
      DeterministicTerm::ConstantTrend => {
        row.push(1.0);
        row.push((t + 1) as f64);
      }
    }

    // y_{t-1} term, with dy-index t corresponding to original time t+1.
    row.push(y[t]);

    for i in 1..=lags {
      row.push(dy[t - i]);
    }

    rhs.push(row);
  }

  let gamma_index = match det {
    DeterministicTerm::None => 0,
    DeterministicTerm::Constant => 1,
    DeterministicTerm::ConstantTrend => 2,
  };

  Ok((lhs, rhs, gamma_index))
}

/// Fit the ADF regression at a fixed lag order and extract the t-statistic
/// on the lagged level.
///
/// An exact fit (SSE indistinguishable from zero) leaves the t-statistic
/// undefined. When the level coefficient is itself zero the series carries
/// no mean-reversion signal and the statistic is reported as `0.0`; a
/// nonzero coefficient with zero residual variance is an error.
pub fn fit_adf(y: &[f64], lags: usize, det: DeterministicTerm) -> Result<AdfFit, ADFError> {
  let (lhs, rhs, gamma_index) = build_adf_design(y, lags, det)?;
  let fit = ols(&lhs, &rhs)?;

  let gamma = fit.beta[gamma_index];
  let se = fit.std_err[gamma_index];

  let response_scale = lhs.iter().map(|v| v * v).sum::<f64>();
  if fit.sse <= EXACT_FIT_REL_TOL * response_scale.max(f64::MIN_POSITIVE) {
    if gamma.abs() <= ZERO_GAMMA_TOL {
      return Ok(AdfFit {
        statistic: 0.0,
        nobs: fit.nobs,
      });
    }
    return Err(ADFError::DegenerateRegression);
  }
  if se <= 0.0 || !se.is_finite() {
    return Err(ADFError::DegenerateRegression);
  }

  Ok(AdfFit {
    statistic: gamma / se,
    nobs: fit.nobs,
  })
}

pub fn aic_from_sse(sse: f64, nobs: usize, k: usize) -> f64 {
  let n = nobs as f64;
  n * (sse / n).ln() + 2.0 * k as f64
}

pub fn bic_from_sse(sse: f64, nobs: usize, k: usize) -> f64 {
  let n = nobs as f64;
  n * (sse / n).ln() + (k as f64) * n.ln()
}

/// Pick the lag order in `0..=max_lags` minimizing the information
/// criterion. Candidates whose regression is underdetermined or singular
/// are skipped; ties go to the smaller lag.
pub fn choose_lag(
  y: &[f64],
  det: DeterministicTerm,
  lag_selection: LagSelection,
  max_lags: usize,
) -> Result<usize, ADFError> {
  if let LagSelection::Fixed(p) = lag_selection {
    return Ok(p);
  }

  let mut best: Option<(usize, f64)> = None;

  for lag in 0..=max_lags {
    let fit = match build_adf_design(y, lag, det).and_then(|(lhs, rhs, _)| ols(&lhs, &rhs)) {
      Ok(fit) => fit,
      Err(ADFError::SingularDesign | ADFError::InsufficientSample { .. }) => continue,
      Err(err) => return Err(err),
    };

    let ic = match lag_selection {
      LagSelection::Aic => aic_from_sse(fit.sse, fit.nobs, fit.k),
      LagSelection::Bic => bic_from_sse(fit.sse, fit.nobs, fit.k),
      LagSelection::Fixed(_) => unreachable!(),
    };

    if ic.is_nan() {
      continue;
    }
    if best.map_or(true, |(_, score)| ic < score) {
      best = Some((lag, ic));
    }
  }

  match best {
    Some((lag, _)) => Ok(lag),
    None => Err(ADFError::SingularDesign),
  }
}
