//! Error taxonomy shared by the tester and the boundary adapters.

use serde::Serialize;
use thiserror::Error;

/// Classification of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// Request body is not parseable as the expected structure.
  MalformedPayload,
  /// Body parses but the series is not a sequence of numbers/nulls.
  InvalidInput,
  /// Series is empty or below the minimum observation count after cleaning.
  InsufficientData,
  /// The numerical routine failed during execution.
  ComputationFailure,
}

impl ErrorKind {
  /// HTTP status a boundary layer should report for this kind.
  pub fn http_status(self) -> u16 {
    match self {
      Self::MalformedPayload | Self::InvalidInput | Self::InsufficientData => 400,
      Self::ComputationFailure => 500,
    }
  }
}

/// A classified, human-readable request failure.
///
/// Always fully constructed: an evaluation produces either a
/// [`TestResult`](crate::TestResult) or an `ApiError`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ApiError {
  pub kind: ErrorKind,
  pub message: String,
}

impl ApiError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }
}
