//! Token resolution engine
//!
//! Runs single replacement passes over a template and drives them to a
//! fixed point when recursive resolution is enabled.

use std::borrow::Cow;

use placeholder_domain::{DomainResult, LookupTable, MissingKeyStrategy, ResolverConfig};
use tracing::{debug, trace};

use super::builder::TokenResolverBuilder;
use super::parser::parse_token_body;
use super::scanner::{RawToken, Segment, Segments};
use crate::error::{ResolveError, ResolveResult};

/// Result of resolving a template, with pass bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The resolved text.
    pub resolved: String,

    /// Number of replacement passes that ran.
    pub passes: usize,

    /// Whether the last pass left its input unchanged.
    pub reached_fixed_point: bool,

    /// Names of tokens in the last pass that had no value and no default,
    /// in order of first appearance.
    pub unresolved: Vec<String>,
}

impl ResolutionOutcome {
    /// Returns true if every token of the last pass found a value or default.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Output of a single replacement pass.
struct PassOutput {
    text: String,
    unresolved: Vec<String>,
}

/// Replaces `prefix name[separator default] suffix` tokens with values
/// from a [`LookupTable`].
///
/// A resolver owns an immutable, validated [`ResolverConfig`]; it holds no
/// other state and can be shared freely across threads.
///
/// # Examples
///
/// ```
/// use placeholder_application::TokenResolver;
/// use placeholder_domain::LookupTable;
///
/// let resolver = TokenResolver::builder().build().unwrap();
/// let lookup = LookupTable::new().with("ip", "10.0.0.1");
///
/// let resolved = resolver
///     .resolve("${user:there} logged in from ${ip}", &lookup)
///     .unwrap();
/// assert_eq!(resolved, "there logged in from 10.0.0.1");
/// ```
#[derive(Debug, Clone)]
pub struct TokenResolver {
    config: ResolverConfig,
}

impl TokenResolver {
    /// Creates a resolver from a configuration, validating it first.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn new(config: ResolverConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a builder with default options.
    #[must_use]
    pub fn builder() -> TokenResolverBuilder {
        TokenResolverBuilder::new()
    }

    /// Returns the configuration this resolver was built with.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves every token in `template`.
    ///
    /// Runs one pass, or passes until a fixed point or `max_depth` when
    /// recursive resolution is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingKey`] when the strategy is
    /// [`MissingKeyStrategy::ThrowError`] and a token has neither a value
    /// nor a default.
    pub fn resolve(&self, template: &str, lookup: &LookupTable) -> ResolveResult<String> {
        self.resolve_detailed(template, lookup)
            .map(|outcome| outcome.resolved)
    }

    /// Like [`TokenResolver::resolve`], for callers holding optional inputs.
    ///
    /// An absent template resolves to `None`; an absent lookup behaves like
    /// an empty one.
    ///
    /// # Errors
    ///
    /// Same as [`TokenResolver::resolve`].
    pub fn resolve_optional(
        &self,
        template: Option<&str>,
        lookup: Option<&LookupTable>,
    ) -> ResolveResult<Option<String>> {
        let Some(template) = template else {
            return Ok(None);
        };
        let empty = LookupTable::new();
        self.resolve(template, lookup.unwrap_or(&empty)).map(Some)
    }

    /// Resolves `template` and reports how resolution went.
    ///
    /// # Errors
    ///
    /// Same as [`TokenResolver::resolve`].
    pub fn resolve_detailed(
        &self,
        template: &str,
        lookup: &LookupTable,
    ) -> ResolveResult<ResolutionOutcome> {
        let lookup = lookup.normalized(self.config.ignore_case);
        let limit = self.config.pass_limit();
        let mut current = Cow::Borrowed(template);
        let mut passes = 0;

        loop {
            let output = self.pass(&current, &lookup)?;
            passes += 1;

            let reached_fixed_point = output.text == *current;
            if reached_fixed_point || passes >= limit {
                if !reached_fixed_point && self.config.resolve_recursively {
                    debug!(passes, "stopped at max depth before reaching a fixed point");
                }
                return Ok(ResolutionOutcome {
                    resolved: output.text,
                    passes,
                    reached_fixed_point,
                    unresolved: output.unresolved,
                });
            }

            trace!(pass = passes, "pass changed the template, scanning again");
            current = Cow::Owned(output.text);
        }
    }

    /// Runs exactly one replacement pass.
    ///
    /// Replacement values and defaults are emitted as-is and never scanned
    /// again within the pass.
    ///
    /// # Errors
    ///
    /// Same as [`TokenResolver::resolve`].
    pub fn replace_pass(&self, template: &str, lookup: &LookupTable) -> ResolveResult<String> {
        let lookup = lookup.normalized(self.config.ignore_case);
        self.pass(template, &lookup).map(|output| output.text)
    }

    /// Returns the names one pass would hand to the missing-key strategy,
    /// in order of first appearance. Never fails.
    #[must_use]
    pub fn find_unresolved(&self, template: &str, lookup: &LookupTable) -> Vec<String> {
        let lookup = lookup.normalized(self.config.ignore_case);
        let mut unresolved = Vec::new();

        for token in self.tokens(template) {
            let body = parse_token_body(token.body, &self.config);
            let value = lookup.get(&self.config.normalize_name(&body.name));
            if self.config.is_missing(value) && body.default.is_none() {
                push_unique(&mut unresolved, body.name);
            }
        }

        unresolved
    }

    /// Extracts the names of every complete, unescaped token, in order.
    #[must_use]
    pub fn token_names(&self, template: &str) -> Vec<String> {
        self.tokens(template)
            .map(|token| parse_token_body(token.body, &self.config).name)
            .collect()
    }

    /// Returns true if `template` contains at least one complete token.
    #[must_use]
    pub fn has_tokens(&self, template: &str) -> bool {
        self.tokens(template).next().is_some()
    }

    fn tokens<'a>(&'a self, template: &'a str) -> impl Iterator<Item = RawToken<'a>> {
        Segments::new(template, &self.config).filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Text(_) => None,
        })
    }

    fn pass(&self, template: &str, lookup: &LookupTable) -> ResolveResult<PassOutput> {
        let mut text = String::with_capacity(template.len());
        let mut unresolved = Vec::new();

        for segment in Segments::new(template, &self.config) {
            let token = match segment {
                Segment::Text(literal) => {
                    text.push_str(literal);
                    continue;
                }
                Segment::Token(token) => token,
            };

            let body = parse_token_body(token.body, &self.config);
            let value = lookup.get(&self.config.normalize_name(&body.name));

            match (value, body.default) {
                (Some(value), _) if !self.config.is_missing(Some(value)) => {
                    trace!(name = %body.name, "token replaced from lookup");
                    text.push_str(value);
                }
                (_, Some(default)) => {
                    trace!(name = %body.name, "token replaced with inline default");
                    text.push_str(&default);
                }
                (_, None) => {
                    self.apply_missing_strategy(&token, &body.name, &mut text)?;
                    push_unique(&mut unresolved, body.name);
                }
            }
        }

        Ok(PassOutput { text, unresolved })
    }

    fn apply_missing_strategy(
        &self,
        token: &RawToken<'_>,
        name: &str,
        out: &mut String,
    ) -> ResolveResult<()> {
        match self.config.missing_key_strategy {
            MissingKeyStrategy::LeaveAsIs => out.push_str(token.source),
            MissingKeyStrategy::ReplaceWithEmpty => {}
            MissingKeyStrategy::ReplaceWithFallback => out.push_str(self.config.fallback()),
            MissingKeyStrategy::ThrowError => {
                debug!(name, "missing token aborts resolution");
                return Err(ResolveError::missing_key(name));
            }
        }
        Ok(())
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}
