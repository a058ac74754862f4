//! The flat, merged mapping of raw configuration strings.

use std::collections::BTreeMap;
use std::fmt;

/// Variable name → raw string, case-sensitive.
///
/// `Debug` lists variable names only; values may be secrets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawEnvironment {
    vars: BTreeMap<String, String>,
}

impl RawEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layer `higher` on top of `self`: every key in `higher` replaces ours.
    pub(crate) fn merge(&mut self, higher: RawEnvironment) {
        self.vars.extend(higher.vars);
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.vars.insert(key, value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for RawEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEnvironment")
            .field("keys", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}
