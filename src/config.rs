//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::artifacts::{
    ArtifactPaths, DEFAULT_COLUMNS_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE,
};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the model artifacts
    pub artifact_dir: PathBuf,

    /// Classifier artifact file name (relative to `artifact_dir`)
    pub model_file: String,

    /// Scaler artifact file name
    pub scaler_file: String,

    /// Expected-columns artifact file name
    pub columns_file: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            artifact_dir: lookup("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("artifacts")),

            model_file: lookup("MODEL_FILE")
                .unwrap_or_else(|| DEFAULT_MODEL_FILE.to_string()),

            scaler_file: lookup("SCALER_FILE")
                .unwrap_or_else(|| DEFAULT_SCALER_FILE.to_string()),

            columns_file: lookup("COLUMNS_FILE")
                .unwrap_or_else(|| DEFAULT_COLUMNS_FILE.to_string()),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Resolved artifact locations
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifact_dir.join(&self.model_file),
            scaler: self.artifact_dir.join(&self.scaler_file),
            columns: self.artifact_dir.join(&self.columns_file),
        }
    }
}
