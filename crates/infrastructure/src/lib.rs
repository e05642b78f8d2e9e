//! Placeholder Infrastructure - Adapters for lookup and configuration sources
//!
//! This crate loads resolver configuration and lookup tables from files
//! and from the process environment.

pub mod config_loader;
pub mod environment;
pub mod error;
pub mod format;
pub mod lookup_source;

pub use config_loader::{load_resolver_config, parse_resolver_config};
pub use environment::{environment_lookup, environment_lookup_from};
pub use error::{InfrastructureError, InfrastructureResult};
pub use format::SourceFormat;
pub use lookup_source::{load_lookup, load_lookups, parse_lookup};
