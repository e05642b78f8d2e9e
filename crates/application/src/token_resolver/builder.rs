//! Builder for [`TokenResolver`]

use placeholder_domain::{DomainResult, MissingKeyStrategy, ResolverConfig};

use super::engine::TokenResolver;

/// Accumulates resolver options and validates them on [`build`].
///
/// Starts from [`ResolverConfig::default`]: `${`/`}` delimiters, `\`
/// escape, case-sensitive, trimming on, non-recursive, depth 10,
/// [`MissingKeyStrategy::LeaveAsIs`], `:` separator.
///
/// # Examples
///
/// ```
/// use placeholder_application::TokenResolver;
/// use placeholder_domain::{LookupTable, MissingKeyStrategy};
///
/// let resolver = TokenResolver::builder()
///     .prefix("{{")
///     .suffix("}}")
///     .missing_key_strategy(MissingKeyStrategy::ReplaceWithFallback)
///     .missing_replacement("?")
///     .build()
///     .unwrap();
///
/// let lookup = LookupTable::new().with("host", "localhost");
/// assert_eq!(resolver.resolve("{{host}}:{{port}}", &lookup).unwrap(), "localhost:?");
/// ```
///
/// [`build`]: TokenResolverBuilder::build
#[derive(Debug, Clone, Default)]
pub struct TokenResolverBuilder {
    config: ResolverConfig,
}

impl TokenResolverBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded from an existing configuration.
    #[must_use]
    pub const fn from_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Sets the token-opening delimiter.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Sets the token-closing delimiter.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.suffix = suffix.into();
        self
    }

    /// Sets the escape character.
    #[must_use]
    pub const fn escape_char(mut self, escape: char) -> Self {
        self.config.escape_char = Some(escape);
        self
    }

    /// Disables escaping.
    #[must_use]
    pub const fn no_escape(mut self) -> Self {
        self.config.escape_char = None;
        self
    }

    /// Sets or clears the escape character.
    #[must_use]
    pub const fn escape(mut self, escape: Option<char>) -> Self {
        self.config.escape_char = escape;
        self
    }

    /// Compares names and lookup keys in lowercase.
    #[must_use]
    pub const fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.config.ignore_case = ignore_case;
        self
    }

    /// Trims whitespace around parsed names and defaults.
    #[must_use]
    pub const fn trim_token_parts(mut self, trim: bool) -> Self {
        self.config.trim_token_parts = trim;
        self
    }

    /// Repeats the replacement pass until nothing changes.
    #[must_use]
    pub const fn resolve_recursively(mut self, recursive: bool) -> Self {
        self.config.resolve_recursively = recursive;
        self
    }

    /// Bounds the number of recursive passes.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Sets the behavior for tokens with no value and no default.
    #[must_use]
    pub const fn missing_key_strategy(mut self, strategy: MissingKeyStrategy) -> Self {
        self.config.missing_key_strategy = strategy;
        self
    }

    /// Sets the fallback text used by [`MissingKeyStrategy::ReplaceWithFallback`].
    #[must_use]
    pub fn missing_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.config.missing_replacement = Some(replacement.into());
        self
    }

    /// Sets the separator between a name and its inline default.
    #[must_use]
    pub fn default_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.default_separator = separator.into();
        self
    }

    /// Treats mapped empty strings as missing.
    #[must_use]
    pub const fn treat_empty_as_missing(mut self, enabled: bool) -> Self {
        self.config.treat_empty_as_missing = enabled;
        self
    }

    /// Treats mapped all-whitespace strings as missing.
    #[must_use]
    pub const fn treat_blank_as_missing(mut self, enabled: bool) -> Self {
        self.config.treat_blank_as_missing = enabled;
        self
    }

    /// Returns the options accumulated so far.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Validates the options and produces an immutable resolver.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](placeholder_domain::ConfigError) for an
    /// empty prefix, suffix or separator, a depth below one, or a
    /// separator that contains the suffix.
    pub fn build(self) -> DomainResult<TokenResolver> {
        TokenResolver::new(self.config)
    }
}
