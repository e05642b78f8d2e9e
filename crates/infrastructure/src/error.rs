//! Infrastructure error types

use std::io;
use std::path::PathBuf;

use placeholder_domain::ConfigError;
use thiserror::Error;

/// Errors raised while loading lookup tables or resolver configuration.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON parsing failed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Properties parsing failed.
    #[error("invalid properties: {0}")]
    Properties(#[from] java_properties::PropertiesError),

    /// The file extension maps to no supported format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A lookup document was not a mapping at the top level.
    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    /// A loaded resolver configuration failed validation.
    #[error("invalid resolver configuration: {0}")]
    Config(#[from] ConfigError),
}

impl InfrastructureError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for infrastructure operations.
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
