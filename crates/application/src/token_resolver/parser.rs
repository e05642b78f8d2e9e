//! Token body parser
//!
//! Splits the text between prefix and suffix into a name and an optional
//! inline default.

use placeholder_domain::ResolverConfig;

/// A parsed token body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBody {
    /// The token name, escapes removed.
    pub name: String,

    /// The inline default. `None` when no separator appeared,
    /// `Some("")` when the separator ended the body.
    pub default: Option<String>,
}

impl TokenBody {
    /// Creates a body with a name and no default.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Creates a body with a name and an inline default.
    #[must_use]
    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

/// Parses a raw token body.
///
/// The escape character copies the next character literally into the
/// part being built. The first unescaped separator switches from the name
/// to the default; later separators belong to the default.
///
/// # Examples
///
/// ```
/// use placeholder_application::token_resolver::parser::{TokenBody, parse_token_body};
/// use placeholder_domain::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert_eq!(
///     parse_token_body(" port : 8080 ", &config),
///     TokenBody::with_default("port", "8080")
/// );
/// assert_eq!(parse_token_body(r"a\:b", &config), TokenBody::named("a:b"));
/// ```
#[must_use]
pub fn parse_token_body(raw: &str, config: &ResolverConfig) -> TokenBody {
    let separator = config.default_separator.as_str();
    let mut name = String::with_capacity(raw.len());
    let mut default: Option<String> = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if config.escape_char == Some(ch)
            && let Some((_, escaped)) = chars.next()
        {
            active_part(&mut name, &mut default).push(escaped);
            continue;
        }

        if default.is_none() && raw[i..].starts_with(separator) {
            default = Some(String::new());
            let separator_end = i + separator.len();
            while chars.next_if(|&(j, _)| j < separator_end).is_some() {}
            continue;
        }

        active_part(&mut name, &mut default).push(ch);
    }

    if config.trim_token_parts {
        TokenBody {
            name: name.trim().to_string(),
            default: default.map(|d| d.trim().to_string()),
        }
    } else {
        TokenBody { name, default }
    }
}

fn active_part<'b>(name: &'b mut String, default: &'b mut Option<String>) -> &'b mut String {
    match default {
        Some(default) => default,
        None => name,
    }
}
