//! Resolver configuration loader
//!
//! Reads a [`ResolverConfig`] from a YAML or JSON file. Fields left out of
//! the file keep their defaults; the result is validated before it is
//! returned.

use std::fs;
use std::path::Path;

use placeholder_domain::ResolverConfig;
use tracing::debug;

use crate::error::{InfrastructureError, InfrastructureResult};
use crate::format::SourceFormat;

/// Parses and validates a resolver configuration document.
///
/// # Errors
///
/// Returns a parse error, [`InfrastructureError::UnsupportedFormat`] for
/// properties documents, or [`InfrastructureError::Config`] when the
/// configuration violates an invariant.
pub fn parse_resolver_config(
    content: &str,
    format: SourceFormat,
) -> InfrastructureResult<ResolverConfig> {
    let config: ResolverConfig = match format {
        SourceFormat::Json => serde_json::from_str(content)?,
        SourceFormat::Yaml => {
            // An empty YAML document means "all defaults".
            if content.trim().is_empty() {
                ResolverConfig::default()
            } else {
                serde_yaml::from_str(content)?
            }
        }
        SourceFormat::Properties => {
            return Err(InfrastructureError::UnsupportedFormat(format.to_string()));
        }
    };

    config.validate()?;
    Ok(config)
}

/// Reads a resolver configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// configuration is invalid.
pub fn load_resolver_config(path: impl AsRef<Path>) -> InfrastructureResult<ResolverConfig> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| InfrastructureError::io(path, e))?;
    let config = parse_resolver_config(&content, format)?;
    debug!(path = %path.display(), "loaded resolver configuration");
    Ok(config)
}
