//! Domain error types

use thiserror::Error;

/// Configuration errors raised while validating a [`ResolverConfig`].
///
/// These are only ever produced at build time (or while parsing a
/// configuration value), never while resolving a template.
///
/// [`ResolverConfig`]: crate::config::ResolverConfig
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The token prefix is empty.
    #[error("token prefix must not be empty")]
    EmptyPrefix,

    /// The token suffix is empty.
    #[error("token suffix must not be empty")]
    EmptySuffix,

    /// The default separator is empty.
    #[error("default separator must not be empty")]
    EmptyDefaultSeparator,

    /// The recursion depth is below one.
    #[error("max depth must be at least 1, got {0}")]
    InvalidMaxDepth(usize),

    /// The default separator contains the suffix, so it could never appear
    /// unescaped inside a token body.
    #[error("default separator {separator:?} overlaps token suffix {suffix:?}")]
    SeparatorOverlapsSuffix {
        /// The configured default separator.
        separator: String,
        /// The configured token suffix.
        suffix: String,
    },

    /// A missing-key strategy name could not be parsed.
    #[error("unknown missing-key strategy: {0}")]
    UnknownStrategy(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, ConfigError>;
