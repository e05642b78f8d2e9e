//! Resolver configuration
//!
//! Defines the options that control how tokens are recognized and what
//! happens when a token name has no value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DomainResult};

/// Default token-opening delimiter.
pub const DEFAULT_PREFIX: &str = "${";

/// Default token-closing delimiter.
pub const DEFAULT_SUFFIX: &str = "}";

/// Default escape character.
pub const DEFAULT_ESCAPE_CHAR: char = '\\';

/// Default separator between a token name and its inline default.
pub const DEFAULT_SEPARATOR: &str = ":";

/// Default upper bound on recursive passes.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Behavior for a token whose name has no value and no inline default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyStrategy {
    /// Keep the token text exactly as it appeared (default).
    #[default]
    LeaveAsIs,
    /// Remove the token from the output.
    ReplaceWithEmpty,
    /// Replace the token with the configured fallback text.
    ReplaceWithFallback,
    /// Abort resolution with an error naming the token.
    ThrowError,
}

impl MissingKeyStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::LeaveAsIs,
        Self::ReplaceWithEmpty,
        Self::ReplaceWithFallback,
        Self::ThrowError,
    ];

    /// Returns the canonical snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeaveAsIs => "leave_as_is",
            Self::ReplaceWithEmpty => "replace_with_empty",
            Self::ReplaceWithFallback => "replace_with_fallback",
            Self::ThrowError => "throw_error",
        }
    }
}

impl fmt::Display for MissingKeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingKeyStrategy {
    type Err = ConfigError;

    /// Accepts snake_case, kebab-case and CamelCase spellings, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().replace('_', "") == normalized)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// Options controlling token recognition and substitution.
///
/// A config is plain data; [`ResolverConfig::validate`] checks the
/// invariants a resolver relies on. Partial YAML or JSON documents
/// deserialize with the remaining fields taken from [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Token-opening delimiter, e.g. `${`.
    pub prefix: String,

    /// Token-closing delimiter, e.g. `}`.
    pub suffix: String,

    /// Character that makes the following character literal.
    pub escape_char: Option<char>,

    /// Compare token names and lookup keys in lowercase.
    pub ignore_case: bool,

    /// Strip surrounding whitespace from parsed names and defaults.
    pub trim_token_parts: bool,

    /// Re-run the replacement pass until nothing changes.
    pub resolve_recursively: bool,

    /// Upper bound on replacement passes in recursive mode.
    pub max_depth: usize,

    /// What to do with a token that has no value and no default.
    pub missing_key_strategy: MissingKeyStrategy,

    /// Replacement text for [`MissingKeyStrategy::ReplaceWithFallback`].
    pub missing_replacement: Option<String>,

    /// Separates a token name from its inline default.
    pub default_separator: String,

    /// Treat a mapped empty string as missing.
    pub treat_empty_as_missing: bool,

    /// Treat a mapped all-whitespace string as missing.
    pub treat_blank_as_missing: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            escape_char: Some(DEFAULT_ESCAPE_CHAR),
            ignore_case: false,
            trim_token_parts: true,
            resolve_recursively: false,
            max_depth: DEFAULT_MAX_DEPTH,
            missing_key_strategy: MissingKeyStrategy::LeaveAsIs,
            missing_replacement: None,
            default_separator: DEFAULT_SEPARATOR.to_string(),
            treat_empty_as_missing: false,
            treat_blank_as_missing: false,
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the invariants every resolver depends on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: empty prefix, suffix or
    /// separator, a depth below one, or a separator that contains the
    /// suffix.
    pub fn validate(&self) -> DomainResult<()> {
        if self.prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if self.suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        if self.default_separator.is_empty() {
            return Err(ConfigError::EmptyDefaultSeparator);
        }
        if self.max_depth < 1 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }
        if self.default_separator.contains(self.suffix.as_str()) {
            return Err(ConfigError::SeparatorOverlapsSuffix {
                separator: self.default_separator.clone(),
                suffix: self.suffix.clone(),
            });
        }
        Ok(())
    }

    /// Returns the fallback text, empty when none is configured.
    #[must_use]
    pub fn fallback(&self) -> &str {
        self.missing_replacement.as_deref().unwrap_or_default()
    }

    /// Returns the number of passes a resolution may run.
    #[must_use]
    pub const fn pass_limit(&self) -> usize {
        if self.resolve_recursively {
            self.max_depth
        } else {
            1
        }
    }

    /// Returns true if a mapped value should be treated as missing.
    #[must_use]
    pub fn is_missing(&self, value: Option<&str>) -> bool {
        match value {
            None => true,
            Some(v) if self.treat_empty_as_missing && v.is_empty() => true,
            Some(v) if self.treat_blank_as_missing && v.trim().is_empty() => true,
            Some(_) => false,
        }
    }

    /// Normalizes a token name for lookup.
    #[must_use]
    pub fn normalize_name(&self, name: &str) -> String {
        if self.ignore_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.prefix, "${");
        assert_eq!(config.suffix, "}");
        assert_eq!(config.escape_char, Some('\\'));
        assert!(!config.ignore_case);
        assert!(config.trim_token_parts);
        assert!(!config.resolve_recursively);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.missing_key_strategy, MissingKeyStrategy::LeaveAsIs);
        assert_eq!(config.missing_replacement, None);
        assert_eq!(config.default_separator, ":");
        assert!(!config.treat_empty_as_missing);
        assert!(!config.treat_blank_as_missing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = ResolverConfig {
            prefix: String::new(),
            ..ResolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPrefix));
    }

    #[test]
    fn test_validate_empty_suffix() {
        let config = ResolverConfig {
            suffix: String::new(),
            ..ResolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySuffix));
    }

    #[test]
    fn test_validate_empty_separator() {
        let config = ResolverConfig {
            default_separator: String::new(),
            ..ResolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyDefaultSeparator));
    }

    #[test]
    fn test_validate_zero_depth() {
        let config = ResolverConfig {
            max_depth: 0,
            ..ResolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxDepth(0)));
    }

    #[test]
    fn test_validate_separator_overlapping_suffix() {
        let config = ResolverConfig {
            default_separator: "}".to_string(),
            ..ResolverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SeparatorOverlapsSuffix { .. })
        ));

        let config = ResolverConfig {
            default_separator: ":}".to_string(),
            ..ResolverConfig::default()
        };
        assert!(config.validate().is_err());

        // A suffix that merely contains the separator is fine.
        let config = ResolverConfig {
            suffix: ":}".to_string(),
            ..ResolverConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pass_limit() {
        let mut config = ResolverConfig {
            max_depth: 4,
            ..ResolverConfig::default()
        };
        assert_eq!(config.pass_limit(), 1);
        config.resolve_recursively = true;
        assert_eq!(config.pass_limit(), 4);
    }

    #[test]
    fn test_is_missing() {
        let mut config = ResolverConfig::default();
        assert!(config.is_missing(None));
        assert!(!config.is_missing(Some("")));
        assert!(!config.is_missing(Some("  ")));

        config.treat_empty_as_missing = true;
        assert!(config.is_missing(Some("")));
        assert!(!config.is_missing(Some("  ")));

        config.treat_empty_as_missing = false;
        config.treat_blank_as_missing = true;
        assert!(config.is_missing(Some(" \t\n")));
        assert!(config.is_missing(Some("")));
        assert!(!config.is_missing(Some(" x ")));
    }

    #[test]
    fn test_fallback_defaults_to_empty() {
        let mut config = ResolverConfig::default();
        assert_eq!(config.fallback(), "");
        config.missing_replacement = Some("N/A".to_string());
        assert_eq!(config.fallback(), "N/A");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "leave_as_is".parse::<MissingKeyStrategy>(),
            Ok(MissingKeyStrategy::LeaveAsIs)
        );
        assert_eq!(
            "replace-with-empty".parse::<MissingKeyStrategy>(),
            Ok(MissingKeyStrategy::ReplaceWithEmpty)
        );
        assert_eq!(
            "ReplaceWithFallback".parse::<MissingKeyStrategy>(),
            Ok(MissingKeyStrategy::ReplaceWithFallback)
        );
        assert_eq!(
            "THROW_ERROR".parse::<MissingKeyStrategy>(),
            Ok(MissingKeyStrategy::ThrowError)
        );
        assert_eq!(
            "explode".parse::<MissingKeyStrategy>(),
            Err(ConfigError::UnknownStrategy("explode".to_string()))
        );
    }

    #[test]
    fn test_strategy_display_matches_serde() {
        for strategy in MissingKeyStrategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{strategy}\""));
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"prefix": "{{", "suffix": "}}", "missing_key_strategy": "throw_error"}"#)
                .unwrap();
        assert_eq!(config.prefix, "{{");
        assert_eq!(config.suffix, "}}");
        assert_eq!(config.missing_key_strategy, MissingKeyStrategy::ThrowError);
        assert_eq!(config.default_separator, ":");
        assert_eq!(config.escape_char, Some('\\'));
    }

    #[test]
    fn test_null_escape_char_disables_escaping() {
        let config: ResolverConfig = serde_json::from_str(r#"{"escape_char": null}"#).unwrap();
        assert_eq!(config.escape_char, None);
    }
}
