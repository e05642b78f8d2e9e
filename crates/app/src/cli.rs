//! Command-line arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use placeholder_application::{TokenResolver, TokenResolverBuilder};
use placeholder_domain::{LookupTable, MissingKeyStrategy, ResolverConfig};
use placeholder_infrastructure::{environment_lookup, load_lookups, load_resolver_config};

/// Resolve `${name:default}` tokens in a template.
#[derive(Parser, Debug, Clone)]
#[command(name = "placeholder", version)]
#[command(about = "Resolve ${name:default} tokens in a template")]
pub struct Args {
    /// Template file; `-` or omitted reads stdin
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Lookup file (.json, .yaml, .yml, .properties); later files win
    #[arg(short, long = "lookup", value_name = "FILE")]
    pub lookups: Vec<PathBuf>,

    /// Include the process environment (lowest precedence)
    #[arg(short, long)]
    pub env: bool,

    /// Define a value (highest precedence)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_definition)]
    pub definitions: Vec<(String, String)>,

    /// Resolver configuration file (.yaml, .yml, .json)
    #[arg(short, long, value_name = "FILE", env = "PLACEHOLDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Token prefix
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Token suffix
    #[arg(long, value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Escape character
    #[arg(long, value_name = "CHAR", conflicts_with = "no_escape")]
    pub escape: Option<char>,

    /// Disable escaping
    #[arg(long)]
    pub no_escape: bool,

    /// Match token names case-insensitively
    #[arg(long, conflicts_with = "case_sensitive")]
    pub ignore_case: bool,

    /// Match token names exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Keep whitespace around names and defaults
    #[arg(long, conflicts_with = "trim")]
    pub no_trim: bool,

    /// Trim whitespace around names and defaults
    #[arg(long)]
    pub trim: bool,

    /// Resolve tokens introduced by values and defaults
    #[arg(long, conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Run a single replacement pass
    #[arg(long)]
    pub no_recursive: bool,

    /// Maximum number of passes in recursive mode
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Missing-key strategy: leave_as_is, replace_with_empty, replace_with_fallback, throw_error
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<MissingKeyStrategy>,

    /// Fallback text for replace_with_fallback
    #[arg(long, value_name = "TEXT")]
    pub fallback: Option<String>,

    /// Separator between a name and its default
    #[arg(long, value_name = "TEXT")]
    pub separator: Option<String>,

    /// Treat empty values as missing
    #[arg(long, conflicts_with = "no_empty_as_missing")]
    pub empty_as_missing: bool,

    /// Treat empty values as present
    #[arg(long)]
    pub no_empty_as_missing: bool,

    /// Treat whitespace-only values as missing
    #[arg(long, conflicts_with = "no_blank_as_missing")]
    pub blank_as_missing: bool,

    /// Treat whitespace-only values as present
    #[arg(long)]
    pub no_blank_as_missing: bool,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `placeholder_application=trace`)
    #[arg(long, value_name = "FILTER", env = "PLACEHOLDER_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Loads the configuration file (if any) and applies flag overrides.
    ///
    /// # Errors
    ///
    /// Fails when the configuration file cannot be loaded or the final
    /// options are invalid.
    pub fn resolver(&self) -> Result<TokenResolver> {
        let base = match &self.config {
            Some(path) => load_resolver_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => ResolverConfig::default(),
        };

        self.apply_overrides(TokenResolverBuilder::from_config(base))
            .build()
            .context("invalid resolver options")
    }

    /// Boolean flags come in enable/disable pairs. Passing neither keeps
    /// the configuration file's value.
    fn apply_overrides(&self, mut builder: TokenResolverBuilder) -> TokenResolverBuilder {
        if let Some(prefix) = &self.prefix {
            builder = builder.prefix(prefix.as_str());
        }
        if let Some(suffix) = &self.suffix {
            builder = builder.suffix(suffix.as_str());
        }
        if let Some(escape) = self.escape {
            builder = builder.escape_char(escape);
        }
        if self.no_escape {
            builder = builder.no_escape();
        }
        if let Some(ignore_case) = toggle(self.ignore_case, self.case_sensitive) {
            builder = builder.ignore_case(ignore_case);
        }
        if let Some(trim) = toggle(self.trim, self.no_trim) {
            builder = builder.trim_token_parts(trim);
        }
        if let Some(recursive) = toggle(self.recursive, self.no_recursive) {
            builder = builder.resolve_recursively(recursive);
        }
        if let Some(max_depth) = self.max_depth {
            builder = builder.max_depth(max_depth);
        }
        if let Some(strategy) = self.strategy {
            builder = builder.missing_key_strategy(strategy);
        }
        if let Some(fallback) = &self.fallback {
            builder = builder.missing_replacement(fallback.as_str());
        }
        if let Some(separator) = &self.separator {
            builder = builder.default_separator(separator.as_str());
        }
        if let Some(enabled) = toggle(self.empty_as_missing, self.no_empty_as_missing) {
            builder = builder.treat_empty_as_missing(enabled);
        }
        if let Some(enabled) = toggle(self.blank_as_missing, self.no_blank_as_missing) {
            builder = builder.treat_blank_as_missing(enabled);
        }
        builder
    }

    /// Merges the environment, lookup files and `--define` values.
    ///
    /// # Errors
    ///
    /// Fails when a lookup file cannot be loaded.
    pub fn lookup_table(&self) -> Result<LookupTable> {
        let environment = if self.env {
            environment_lookup()
        } else {
            LookupTable::new()
        };
        let files = load_lookups(&self.lookups).context("failed to load lookup files")?;
        Ok(layer_lookups(environment, files, &self.definitions))
    }
}

/// Stacks lookup sources from lowest to highest precedence.
fn layer_lookups(
    environment: LookupTable,
    files: LookupTable,
    definitions: &[(String, String)],
) -> LookupTable {
    let mut table = environment;
    table.merge(files);
    table.extend(definitions.iter().cloned());
    table
}

/// Resolves an enable/disable flag pair. Clap rejects both at once.
const fn toggle(enable: bool, disable: bool) -> Option<bool> {
    match (enable, disable) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn parse_definition(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use placeholder_infrastructure::{SourceFormat, environment_lookup_from, parse_lookup};
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("placeholder").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_definition() {
        assert_eq!(
            parse_definition("url=jdbc:h2:mem:a=b"),
            Ok(("url".to_string(), "jdbc:h2:mem:a=b".to_string()))
        );
        assert_eq!(parse_definition("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_definition("novalue").is_err());
        assert!(parse_definition("=x").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.template, None);
        assert!(args.lookups.is_empty());
        let resolver = args.resolver().unwrap();
        assert_eq!(resolver.config(), &ResolverConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "--prefix",
            "{{",
            "--suffix",
            "}}",
            "--no-escape",
            "--ignore-case",
            "--no-trim",
            "--recursive",
            "--max-depth",
            "4",
            "--strategy",
            "replace-with-fallback",
            "--fallback",
            "?",
            "--separator",
            "|",
            "--empty-as-missing",
            "--blank-as-missing",
        ]);
        let resolver = args.resolver().unwrap();
        let config = resolver.config();

        assert_eq!(config.prefix, "{{");
        assert_eq!(config.suffix, "}}");
        assert_eq!(config.escape_char, None);
        assert!(config.ignore_case);
        assert!(!config.trim_token_parts);
        assert!(config.resolve_recursively);
        assert_eq!(config.max_depth, 4);
        assert_eq!(
            config.missing_key_strategy,
            MissingKeyStrategy::ReplaceWithFallback
        );
        assert_eq!(config.fallback(), "?");
        assert_eq!(config.default_separator, "|");
        assert!(config.treat_empty_as_missing);
        assert!(config.treat_blank_as_missing);
    }

    #[test]
    fn test_invalid_override_fails_at_build() {
        let args = parse(&["--max-depth", "0"]);
        assert!(args.resolver().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected_by_parser() {
        let result = Args::try_parse_from(["placeholder", "--strategy", "explode"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_escape_conflicts_with_no_escape() {
        let result = Args::try_parse_from(["placeholder", "--escape", "!", "--no-escape"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negated_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("resolver.yaml");
        std::fs::write(
            &config,
            "ignore_case: true\ntrim_token_parts: false\nresolve_recursively: true\n\
             treat_empty_as_missing: true\ntreat_blank_as_missing: true\n",
        )
        .unwrap();

        let kept = parse(&["--config", config.to_str().unwrap()]);
        let kept = kept.resolver().unwrap();
        assert!(kept.config().ignore_case);
        assert!(kept.config().resolve_recursively);

        let args = parse(&[
            "--config",
            config.to_str().unwrap(),
            "--case-sensitive",
            "--trim",
            "--no-recursive",
            "--no-empty-as-missing",
            "--no-blank-as-missing",
        ]);
        let resolver = args.resolver().unwrap();
        let config = resolver.config();

        assert!(!config.ignore_case);
        assert!(config.trim_token_parts);
        assert!(!config.resolve_recursively);
        assert!(!config.treat_empty_as_missing);
        assert!(!config.treat_blank_as_missing);
    }

    #[test]
    fn test_flag_pair_conflicts() {
        let result = Args::try_parse_from(["placeholder", "--ignore-case", "--case-sensitive"]);
        assert!(result.is_err());
        let result = Args::try_parse_from(["placeholder", "--recursive", "--no-recursive"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_precedence_environment_files_definitions() {
        let environment = environment_lookup_from([
            ("HOST", "env-host"),
            ("PORT", "1111"),
            ("USER", "env-user"),
        ]);
        let files = parse_lookup("HOST=file-host\nPORT=2222\n", SourceFormat::Properties).unwrap();
        let definitions = vec![("PORT".to_string(), "3333".to_string())];

        let table = layer_lookups(environment, files, &definitions);

        assert_eq!(table.get("USER"), Some("env-user"));
        assert_eq!(table.get("HOST"), Some("file-host"));
        assert_eq!(table.get("PORT"), Some("3333"));
    }

    #[test]
    fn test_env_flag_includes_process_environment() {
        let args = parse(&["--env"]);
        let table = args.lookup_table().unwrap();
        assert_eq!(table.len(), environment_lookup().len());

        let args = parse(&[]);
        assert!(args.lookup_table().unwrap().is_empty());
    }

    #[test]
    fn test_definitions_win_over_nothing() {
        let args = parse(&["-D", "a=1", "--define", "b=2", "-D", "a=3"]);
        let table = args.lookup_table().unwrap();
        assert_eq!(table.get("a"), Some("3"));
        assert_eq!(table.get("b"), Some("2"));
    }
}
