//! Lookup table loaders
//!
//! Reads name/value pairs from JSON, YAML and `.properties` documents.
//! Nested mappings are flattened into dot-separated names and sequences
//! into indexed names, so
//!
//! ```yaml
//! spring:
//!   datasource:
//!     url: jdbc:h2:mem:test
//!   hosts: [a, b]
//! ```
//!
//! yields `spring.datasource.url`, `spring.hosts[0]` and `spring.hosts[1]`.

use std::fs;
use std::path::Path;

use placeholder_domain::LookupTable;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{InfrastructureError, InfrastructureResult};
use crate::format::SourceFormat;

/// Parses a lookup document of the given format.
///
/// # Errors
///
/// Returns a parse error, or [`InfrastructureError::NotAMapping`] when a
/// JSON or YAML document is not a mapping at the top level.
pub fn parse_lookup(content: &str, format: SourceFormat) -> InfrastructureResult<LookupTable> {
    match format {
        SourceFormat::Json => flatten_document(serde_json::from_str(content)?),
        SourceFormat::Yaml => {
            let document: serde_yaml::Value = serde_yaml::from_str(content)?;
            flatten_document(yaml_to_json(document))
        }
        SourceFormat::Properties => {
            let properties = java_properties::read(content.as_bytes())?;
            Ok(properties.into_iter().collect())
        }
    }
}

/// Reads a lookup file, choosing the format from its extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or its content does not parse.
pub fn load_lookup(path: impl AsRef<Path>) -> InfrastructureResult<LookupTable> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| InfrastructureError::io(path, e))?;
    let table = parse_lookup(&content, format)?;
    debug!(path = %path.display(), %format, entries = table.len(), "loaded lookup source");
    Ok(table)
}

/// Reads several lookup files and merges them; later files win.
///
/// # Errors
///
/// Stops at the first file that fails to load.
pub fn load_lookups<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> InfrastructureResult<LookupTable> {
    let mut merged = LookupTable::new();
    for path in paths {
        merged.merge(load_lookup(path)?);
    }
    Ok(merged)
}

fn flatten_document(document: Value) -> InfrastructureResult<LookupTable> {
    let kind = match &document {
        Value::Object(_) => None,
        Value::Null => Some("null"),
        Value::Bool(_) => Some("a boolean"),
        Value::Number(_) => Some("a number"),
        Value::String(_) => Some("a string"),
        Value::Array(_) => Some("a sequence"),
    };
    if let Some(kind) = kind {
        return Err(InfrastructureError::NotAMapping(kind));
    }

    let mut table = LookupTable::new();
    flatten_into(String::new(), document, &mut table);
    Ok(table)
}

fn flatten_into(name: String, value: Value, table: &mut LookupTable) {
    match value {
        Value::Object(map) => {
            if map.is_empty() {
                trace!(%name, "skipping empty mapping");
            }
            for (key, child) in map {
                let child_name = if name.is_empty() {
                    key
                } else {
                    format!("{name}.{key}")
                };
                flatten_into(child_name, child, table);
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                trace!(%name, "skipping empty sequence");
            }
            for (index, child) in items.into_iter().enumerate() {
                flatten_into(format!("{name}[{index}]"), child, table);
            }
        }
        Value::Null => table.insert_absent(name),
        Value::String(text) => table.insert(name, text),
        Value::Bool(flag) => table.insert(name, flag.to_string()),
        Value::Number(number) => table.insert(name, number.to_string()),
    }
}

/// Converts YAML into the JSON model, rendering scalar keys as text.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(flag) => Value::Bool(flag),
        serde_yaml::Value::Number(number) => Value::String(number.to_string()),
        serde_yaml::Value::String(text) => Value::String(text),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .filter_map(|(key, child)| match yaml_key(key) {
                    Some(key) => Some((key, yaml_to_json(child))),
                    None => {
                        trace!("skipping non-scalar mapping key");
                        None
                    }
                })
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(text) => Some(text),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}
