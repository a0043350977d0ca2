//! Error types for the BMI engine
//!
//! Classification itself never fails: unrecognized sex tokens degrade to
//! unknown and unmatched ages fall back to the default table. Errors only
//! arise when ingesting subject records from JSON.

use thiserror::Error;

/// Errors that can occur while parsing subject records.
#[derive(Debug, Error)]
pub enum BmiError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid subject record: {0}")]
    InvalidRecord(String),
}
