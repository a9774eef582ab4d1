//! MacKinnon approximations for the Dickey-Fuller tau distribution:
//! response-surface p-values (MacKinnon 1994) and finite-sample critical
//! values (MacKinnon 2010).

use serde::Serialize;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use super::DeterministicTerm;

/// Critical values at the 1%, 5%, 10% levels.
///
/// Serializes with the significance-level labels used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
  #[serde(rename = "1%")]
  pub one_percent: f64,
  #[serde(rename = "5%")]
  pub five_percent: f64,
  #[serde(rename = "10%")]
  pub ten_percent: f64,
}

impl CriticalValues {
  pub fn value_at(self, alpha: f64) -> f64 {
    if alpha <= 0.01 {
      self.one_percent
    } else if alpha <= 0.05 {
      self.five_percent
    } else {
      self.ten_percent
    }
  }
}

struct TauSurface {
  star: f64,
  min: f64,
  max: f64,
  small_p: [f64; 3],
  large_p: [f64; 4],
}

// MacKinnon (1994) polynomial surfaces in the test statistic; the small-p
// branch applies left of `star`, outside [min, max] the p-value saturates.
const TAU_NC: TauSurface = TauSurface {
  star: -1.04,
  min: -19.04,
  max: f64::INFINITY,
  small_p: [0.6344, 1.2378, 0.032496],
  large_p: [0.4797, 0.93557, -0.06999, 0.033066],
};

const TAU_C: TauSurface = TauSurface {
  star: -1.61,
  min: -18.83,
  max: 2.74,
  small_p: [2.1659, 1.4412, 0.038269],
  large_p: [1.7339, 0.93202, -0.12745, -0.010368],
};

const TAU_CT: TauSurface = TauSurface {
  star: -2.89,
  min: -16.18,
  max: 0.7,
  small_p: [3.2512, 1.6047, 0.049588],
  large_p: [2.5261, 0.61654, -0.27856, -0.014247],
};

// MacKinnon (2010) response surfaces b0 + b1/n + b2/n^2 + b3/n^3 for the
// finite-sample 1%, 5%, 10% critical values.
const CRIT_NC: [[f64; 4]; 3] = [
  [-2.56574, -2.2358, -3.627, 0.0],
  [-1.94100, -0.2686, -3.365, 31.223],
  [-1.61682, 0.2656, -2.714, 17.296],
];

const CRIT_C: [[f64; 4]; 3] = [
  [-3.43035, -6.5393, -16.786, -79.433],
  [-2.86154, -2.8903, -4.234, -40.040],
  [-2.56677, -1.5384, -2.809, 0.0],
];

const CRIT_CT: [[f64; 4]; 3] = [
  [-3.95877, -9.0531, -28.428, -134.155],
  [-3.41049, -4.3904, -9.036, -45.374],
  [-3.12705, -2.5856, -3.925, -22.380],
];

fn surface(det: DeterministicTerm) -> &'static TauSurface {
  match det {
    DeterministicTerm::None => &TAU_NC,
    DeterministicTerm::Constant => &TAU_C,
    DeterministicTerm::ConstantTrend => &TAU_CT,
  }
}

fn polyval(coeffs: &[f64], x: f64) -> f64 {
  coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Approximate p-value of the ADF t-statistic under the unit-root null.
pub fn p_value(statistic: f64, det: DeterministicTerm) -> f64 {
  let s = surface(det);
  if statistic > s.max {
    return 1.0;
  }
  if statistic < s.min {
    return 0.0;
  }

  let z = if statistic <= s.star {
    polyval(&s.small_p, statistic)
  } else {
    polyval(&s.large_p, statistic)
  };

  Normal::standard().cdf(z).clamp(0.0, 1.0)
}

/// Finite-sample critical values for a regression with `nobs` observations.
pub fn critical_values(det: DeterministicTerm, nobs: usize) -> CriticalValues {
  let table = match det {
    DeterministicTerm::None => &CRIT_NC,
    DeterministicTerm::Constant => &CRIT_C,
    DeterministicTerm::ConstantTrend => &CRIT_CT,
  };

  let n = nobs.max(1) as f64;
  let eval = |b: &[f64; 4]| b[0] + b[1] / n + b[2] / (n * n) + b[3] / (n * n * n);

  CriticalValues {
    one_percent: eval(&table[0]),
    five_percent: eval(&table[1]),
    ten_percent: eval(&table[2]),
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::adf::DeterministicTerm;

  #[test]
  fn p_value_matches_constant_case_cutoffs() {
    // The asymptotic critical values must map close to their own levels.
    assert_abs_diff_eq!(
      p_value(-3.43, DeterministicTerm::Constant),
      0.01,
      epsilon = 2e-3
    );
    assert_abs_diff_eq!(
      p_value(-2.86, DeterministicTerm::Constant),
      0.05,
      epsilon = 5e-3
    );
    assert_abs_diff_eq!(
      p_value(-2.57, DeterministicTerm::Constant),
      0.10,
      epsilon = 1e-2
    );
  }

  #[test]
  fn p_value_is_monotone_in_the_statistic() {
    let mut prev = 0.0;
    let mut s = -10.0;
    while s <= 2.0 {
      let p = p_value(s, DeterministicTerm::Constant);
      assert!(p >= prev, "p-value decreased at statistic {s}");
      prev = p;
      s += 0.25;
    }
  }

  #[test]
  fn p_value_saturates_outside_surface_domain() {
    assert_eq!(p_value(-30.0, DeterministicTerm::Constant), 0.0);
    assert_eq!(p_value(5.0, DeterministicTerm::Constant), 1.0);
    assert_eq!(p_value(-25.0, DeterministicTerm::ConstantTrend), 0.0);
  }

  #[test]
  fn p_value_near_zero_statistic_is_large() {
    let p = p_value(0.0, DeterministicTerm::Constant);
    assert!(p > 0.9, "got {p}");
  }

  #[test]
  fn p_value_is_continuous_at_the_branch_point() {
    let s = surface(DeterministicTerm::Constant);
    let left = p_value(s.star - 1e-9, DeterministicTerm::Constant);
    let right = p_value(s.star + 1e-9, DeterministicTerm::Constant);
    assert_abs_diff_eq!(left, right, epsilon = 1e-2);
  }

  #[test]
  fn critical_values_approach_asymptotic_table() {
    let cv = critical_values(DeterministicTerm::Constant, 1_000_000);
    assert_abs_diff_eq!(cv.one_percent, -3.43, epsilon = 0.01);
    assert_abs_diff_eq!(cv.five_percent, -2.86, epsilon = 0.01);
    assert_abs_diff_eq!(cv.ten_percent, -2.57, epsilon = 0.01);
  }

  #[test]
  fn small_samples_get_more_negative_critical_values() {
    let small = critical_values(DeterministicTerm::Constant, 25);
    let large = critical_values(DeterministicTerm::Constant, 2500);
    assert!(small.one_percent < large.one_percent);
    assert!(small.five_percent < large.five_percent);
    assert!(small.ten_percent < large.ten_percent);
  }

  #[test]
  fn critical_values_are_ordered() {
    for det in [
      DeterministicTerm::None,
      DeterministicTerm::Constant,
      DeterministicTerm::ConstantTrend,
    ] {
      let cv = critical_values(det, 100);
      assert!(cv.one_percent < cv.five_percent);
      assert!(cv.five_percent < cv.ten_percent);
    }
  }

  #[test]
  fn value_at_picks_the_matching_level() {
    let cv = critical_values(DeterministicTerm::Constant, 100);
    assert_eq!(cv.value_at(0.01), cv.one_percent);
    assert_eq!(cv.value_at(0.05), cv.five_percent);
    assert_eq!(cv.value_at(0.10), cv.ten_percent);
  }

  #[test]
  fn serializes_with_percent_labels() {
    let cv = critical_values(DeterministicTerm::Constant, 100);
    let json = serde_json::to_value(cv).unwrap();
    assert!(json.get("1%").is_some());
    assert!(json.get("5%").is_some());
    assert!(json.get("10%").is_some());
  }
}
