//! Server options passed to [`Handler::run`](crate::Handler::run).

use std::collections::BTreeMap;

/// Option key for the address a server binds to.
pub const HOST: &str = "Host";
/// Option key for the port a server listens on.
pub const PORT: &str = "Port";

/// String-keyed server options.
///
/// Keys are free-form; each handler documents the ones it reads through
/// [`Handler::valid_options`](crate::Handler::valid_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, returning the updated set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an option, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove an option, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The `Host` option.
    pub fn host(&self) -> Option<&str> {
        self.get(HOST)
    }

    /// The `Port` option, if present and a valid port number.
    pub fn port(&self) -> Option<u16> {
        self.get(PORT).and_then(|p| p.parse().ok())
    }

    /// Iterate over options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
