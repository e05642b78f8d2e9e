//! Placeholder Domain - Core resolver types
//!
//! This crate defines the configuration and lookup model for the
//! Placeholder token resolver.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod lookup;

pub use config::{
    DEFAULT_ESCAPE_CHAR, DEFAULT_MAX_DEPTH, DEFAULT_PREFIX, DEFAULT_SEPARATOR, DEFAULT_SUFFIX,
    MissingKeyStrategy, ResolverConfig,
};
pub use error::{ConfigError, DomainResult};
pub use lookup::LookupTable;
