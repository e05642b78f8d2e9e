//! Token resolution module
//!
//! Provides parsing and substitution of `${name:default}` style tokens.
//!
//! # Usage
//!
//! ```
//! use placeholder_application::token_resolver::TokenResolver;
//! use placeholder_domain::{LookupTable, MissingKeyStrategy};
//!
//! let resolver = TokenResolver::builder()
//!     .resolve_recursively(true)
//!     .missing_key_strategy(MissingKeyStrategy::ThrowError)
//!     .build()
//!     .unwrap();
//!
//! let lookup = LookupTable::new()
//!     .with("host", "localhost")
//!     .with("url", "jdbc:h2:tcp://${host}/mem");
//!
//! let resolved = resolver
//!     .resolve("${url};driver=${driver:org.h2.Driver}", &lookup)
//!     .unwrap();
//! assert_eq!(resolved, "jdbc:h2:tcp://localhost/mem;driver=org.h2.Driver");
//! ```

pub mod builder;
pub mod engine;
pub mod parser;
pub mod scanner;

pub use builder::TokenResolverBuilder;
pub use engine::{ResolutionOutcome, TokenResolver};
pub use parser::{TokenBody, parse_token_body};
pub use scanner::{RawToken, Segment, Segments};
