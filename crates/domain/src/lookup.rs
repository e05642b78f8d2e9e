//! Lookup table consulted during resolution
//!
//! Maps token names to replacement values. A value may be absent, which
//! always counts as missing.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Name-to-value mapping supplied by the caller.
///
/// Entries are kept in key order so that iteration, serialization and
/// case-folding collisions are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    entries: BTreeMap<String, Option<String>>,
}

impl LookupTable {
    /// Creates an empty lookup table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a name to a value, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), Some(value.into()));
    }

    /// Maps a name to an absent value.
    pub fn insert_absent(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), None);
    }

    /// Builder-style variant of [`LookupTable::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value mapped to `name`.
    /// Unmapped names and absent values both yield `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(Option::as_deref)
    }

    /// Returns true if `name` has an entry, even an absent one.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes an entry and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.entries.remove(name)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Copies every entry of `other` into this table; `other` wins on conflicts.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Returns a copy with every key lowercased.
    ///
    /// When several keys fold to the same lowercase form, the one that sorts
    /// last wins, so an exact lowercase key beats mixed-case spellings.
    #[must_use]
    pub fn to_lowercase_keys(&self) -> Self {
        let entries: BTreeMap<String, Option<String>> = self
            .entries
            .iter()
            .map(|(name, value)| (name.to_lowercase(), value.clone()))
            .collect();
        Self::from(entries)
    }

    /// Returns a view whose keys match `ignore_case` normalization.
    /// Borrows `self` when no normalization is needed.
    #[must_use]
    pub fn normalized(&self, ignore_case: bool) -> Cow<'_, Self> {
        if ignore_case {
            Cow::Owned(self.to_lowercase_keys())
        } else {
            Cow::Borrowed(self)
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for LookupTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl From<HashMap<String, String>> for LookupTable {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for LookupTable {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Option<String>>> for LookupTable {
    fn from(entries: BTreeMap<String, Option<String>>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_and_absent_values() {
        let mut table = LookupTable::new();
        table.insert("host", "localhost");
        table.insert_absent("password");

        assert_eq!(table.get("host"), Some("localhost"));
        assert_eq!(table.get("password"), None);
        assert!(table.contains("password"));
        assert_eq!(table.get("port"), None);
        assert!(!table.contains("port"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_iterator_and_hash_map() {
        let table: LookupTable = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(table.get("b"), Some("2"));

        let map = HashMap::from([("x".to_string(), "y".to_string())]);
        let table = LookupTable::from(map);
        assert_eq!(table.get("x"), Some("y"));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = LookupTable::new().with("a", "1").with("b", "2");
        let overrides = LookupTable::new().with("b", "20").with("c", "30");
        base.merge(overrides);

        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(base.get("b"), Some("20"));
        assert_eq!(base.get("c"), Some("30"));
    }

    #[test]
    fn test_lowercase_keys_prefers_exact_lowercase() {
        let table = LookupTable::new()
            .with("USER", "upper")
            .with("user", "lower")
            .with("Host", "h");
        let folded = table.to_lowercase_keys();

        assert_eq!(folded.get("user"), Some("lower"));
        assert_eq!(folded.get("host"), Some("h"));
        assert_eq!(folded.get("Host"), None);
    }

    #[test]
    fn test_normalized_borrows_when_case_sensitive() {
        let table = LookupTable::new().with("Name", "v");
        assert!(matches!(table.normalized(false), Cow::Borrowed(_)));
        assert_eq!(table.normalized(true).get("name"), Some("v"));
    }

    #[test]
    fn test_deserialize_null_as_absent() {
        let table: LookupTable = serde_json::from_str(r#"{"a": "1", "b": null}"#).unwrap();
        assert_eq!(table.get("a"), Some("1"));
        assert!(table.contains("b"));
        assert_eq!(table.get("b"), None);
    }
}
