//! Structured error types for the wildfire engine.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the incident dataset. Always fatal at startup; there is no partial load.
#[derive(Debug, Error)]
pub enum DataLoadError {
  #[error("cannot read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("schema: {0}")]
  Schema(String),

  #[error("line {line}: {column}: {reason}")]
  Row {
    line: u64,
    column: String,
    reason: String,
  },
}

impl DataLoadError {
  pub fn schema(msg: impl Into<String>) -> Self {
    Self::Schema(msg.into())
  }

  pub fn row(line: u64, column: &str, reason: impl Into<String>) -> Self {
    Self::Row {
      line,
      column: column.to_string(),
      reason: reason.into(),
    }
  }
}

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("data load: {0}")]
  DataLoad(#[from] DataLoadError),

  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
