//! Host alias table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps a request host to the host whose fixture tree should serve it.
///
/// Lookup is an exact, case-sensitive string match. Aliases are not chained:
/// the mapped host is used as-is even if it is itself an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct HostAliases(HashMap<String, String>);

impl HostAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias, replacing any previous mapping for `alias`.
    pub fn with(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.0.insert(alias.into(), canonical.into());
        self
    }

    /// The host whose fixtures serve `host`.
    pub fn canonical<'a>(&'a self, host: &'a str) -> &'a str {
        self.0.get(host).map(String::as_str).unwrap_or(host)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for HostAliases
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for HostAliases {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}
