//! Orchestrator configuration.

use atelier_error::{AtelierResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the batch orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Batch size used by `run_batch_default`
    #[serde(default = "default_count")]
    pub default_count: usize,
    /// Model applied to requests that name none
    #[serde(default)]
    pub model: Option<String>,
}

fn default_count() -> usize {
    4
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            model: None,
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> AtelierResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }

    /// Load configuration from the path named by `ATELIER_CONFIG`, falling
    /// back to defaults when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns error if the named file cannot be read or parsed.
    pub fn from_env() -> AtelierResult<Self> {
        dotenvy::dotenv().ok();
        match std::env::var("ATELIER_CONFIG") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }
}
