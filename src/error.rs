use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a report run. Everything else travels as `anyhow::Error`.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Board '{0}' not found")]
    BoardNotFound(String),

    #[error("List '{0}' not found")]
    ListNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
