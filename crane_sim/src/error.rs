//! Errors of the scenario runner.

use crane_common::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Scenario or model configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing samples failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
