//! Source file formats

use std::fmt;
use std::path::Path;

use crate::error::{InfrastructureError, InfrastructureResult};

/// Formats understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// A JSON document.
    Json,
    /// A YAML document.
    Yaml,
    /// A Java-style `.properties` file.
    Properties,
}

impl SourceFormat {
    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`InfrastructureError::UnsupportedFormat`] for unknown or
    /// missing extensions.
    pub fn from_path(path: &Path) -> InfrastructureResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "properties" => Ok(Self::Properties),
            _ => Err(InfrastructureError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Properties => "properties",
        })
    }
}
