//! Configuration error types.
//!
//! The simulation itself never fails; only loading tuning and settings from
//! disk can.

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
