//! # stationarity-rs
//!
//! Service core for Augmented Dickey-Fuller stationarity testing. The crate
//! validates a raw JSON series, runs the ADF regression with automatic AIC
//! lag selection, and shapes the outcome into a structured result or a
//! classified error.
//!
//! - [`tester::evaluate`] is the pure entry point used by boundary layers.
//! - [`adf`] holds the numerical routine (OLS fit, lag search, MacKinnon
//!   p-values and critical values).
//! - [`api`] exposes the two observed wire schemas as thin adapters.

pub mod adf;
pub mod api;
pub mod error;
pub mod tester;

pub use error::ApiError;
pub use error::ErrorKind;
pub use tester::evaluate;
pub use tester::evaluate_with;
pub use tester::TestConfig;
pub use tester::TestResult;
