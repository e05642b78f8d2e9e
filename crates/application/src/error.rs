//! Application error types

use thiserror::Error;

/// Errors raised while resolving a template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A token had no value and no default under the throwing strategy.
    #[error("no value for token '{name}'")]
    MissingKey {
        /// The (normalized) token name.
        name: String,
    },
}

impl ResolveError {
    /// Creates a missing-key error.
    #[must_use]
    pub fn missing_key(name: impl Into<String>) -> Self {
        Self::MissingKey { name: name.into() }
    }

    /// Returns the token name carried by the error.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::MissingKey { name } => name,
        }
    }
}

/// Result type alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
