//! Case-insensitive response header view.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;

/// Response headers keyed by lowercase name.
///
/// Repeated headers (e.g. several `Set-Cookie` lines) are joined with `", "`.
/// Values that are not valid UTF-8 are decoded lossily rather than dropped,
/// so a header never disappears just because of its encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    values: BTreeMap<String, String>,
}

impl HeaderSet {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header set from a `reqwest` header map.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

    /// Adds a header; appends to an existing value of the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let value = value.into();
        self.values
            .entry(name.as_ref().to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    /// Value of a header, looked up case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true when the header exists with a non-blank value.
    ///
    /// A header sent with an empty value provides no policy, so it is treated
    /// the same as a missing one.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.trim().is_empty())
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no headers are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Headers as `(lowercase name, value)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
