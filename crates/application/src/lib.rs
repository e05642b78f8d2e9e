//! Placeholder Application - Token resolution
//!
//! This crate implements the token resolver on top of the domain types.
//! It performs no I/O: templates and lookup tables are supplied in memory.

pub mod error;
pub mod token_resolver;

pub use error::{ResolveError, ResolveResult};
pub use token_resolver::{ResolutionOutcome, TokenResolver, TokenResolverBuilder};
