//! Template scanner
//!
//! Splits a template into verbatim text and complete token occurrences,
//! honoring escaped prefixes and escaped suffixes.

use std::ops::Range;

use placeholder_domain::ResolverConfig;

/// A complete, unescaped token occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    /// The token exactly as written, delimiters included.
    pub source: &'a str,

    /// The text strictly between prefix and suffix.
    pub body: &'a str,

    /// Byte range of [`RawToken::source`] in the template.
    pub span: Range<usize>,
}

/// A piece of a scanned template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text emitted verbatim.
    Text(&'a str),

    /// A token to substitute.
    Token(RawToken<'a>),
}

/// Iterator over the [`Segment`]s of a template, left to right.
///
/// Concatenating every `Text` segment with every token's `source` gives
/// back the template, except that the escape character in front of an
/// escaped prefix is dropped.
///
/// # Examples
///
/// ```
/// use placeholder_application::token_resolver::scanner::{Segment, Segments};
/// use placeholder_domain::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// let segments: Vec<_> = Segments::new("Hi ${name}!", &config).collect();
///
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0], Segment::Text("Hi "));
/// assert!(matches!(&segments[1], Segment::Token(token) if token.body == "name"));
/// assert_eq!(segments[2], Segment::Text("!"));
/// ```
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    template: &'a str,
    prefix: &'a str,
    suffix: &'a str,
    escape: Option<char>,
    cursor: usize,
    pending: Option<Segment<'a>>,
}

impl<'a> Segments<'a> {
    /// Starts scanning `template` with the delimiters of `config`.
    #[must_use]
    pub fn new(template: &'a str, config: &'a ResolverConfig) -> Self {
        Self {
            template,
            prefix: &config.prefix,
            suffix: &config.suffix,
            escape: config.escape_char,
            cursor: 0,
            pending: None,
        }
    }

    /// True when the character right before `at`, and not before `floor`,
    /// is the escape character.
    fn escaped_at(&self, floor: usize, at: usize) -> bool {
        at > floor
            && self
                .escape
                .is_some_and(|escape| self.template[floor..at].ends_with(escape))
    }

    /// Finds the first suffix at or after `body_start` that is not escaped.
    fn find_suffix(&self, body_start: usize) -> Option<usize> {
        let mut search = body_start;
        while let Some(offset) = self.template[search..].find(self.suffix) {
            let at = search + offset;
            if !self.escaped_at(body_start, at) {
                return Some(at);
            }
            // Step over one character so the probe always moves forward.
            search = at
                + self.template[at..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        None
    }

    /// Returns `leading` first (if any) and queues `segment` behind it.
    fn emit(&mut self, leading: &'a str, segment: Segment<'a>) -> Segment<'a> {
        if leading.is_empty() {
            segment
        } else {
            self.pending = Some(segment);
            Segment::Text(leading)
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }

        let rest = &self.template[self.cursor..];
        if rest.is_empty() {
            return None;
        }

        let Some(offset) = rest.find(self.prefix) else {
            self.cursor = self.template.len();
            return Some(Segment::Text(rest));
        };

        let start = self.cursor + offset;
        let body_start = start + self.prefix.len();

        if let Some(escape) = self.escape
            && self.escaped_at(self.cursor, start)
        {
            let leading = &self.template[self.cursor..start - escape.len_utf8()];
            let literal = &self.template[start..body_start];
            self.cursor = body_start;
            return Some(self.emit(leading, Segment::Text(literal)));
        }

        let leading = &self.template[self.cursor..start];
        let segment = if let Some(end) = self.find_suffix(body_start) {
            let stop = end + self.suffix.len();
            self.cursor = stop;
            Segment::Token(RawToken {
                source: &self.template[start..stop],
                body: &self.template[body_start..end],
                span: start..stop,
            })
        } else {
            // Unterminated: the prefix and everything after it stay as written.
            self.cursor = self.template.len();
            Segment::Text(&self.template[start..])
        };

        Some(self.emit(leading, segment))
    }
}
