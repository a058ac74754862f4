//! Late-bound references to named backends.
//!
//! A `ModuleRef` is only a name at cast time. Whether the name points at a
//! real backend is decided when a consumer resolves it against a
//! `ModuleRegistry`, so an unknown backend fails at its point of use and not
//! during configuration resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Symbolic reference to a named unit of code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRef(String);

impl ModuleRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Look the reference up in `registry`.
    pub fn resolve<'r, T>(&self, registry: &'r ModuleRegistry<T>) -> Result<&'r T, UnknownModule> {
        registry.get(&self.0).ok_or_else(|| UnknownModule {
            name: self.0.clone(),
            known: registry.names().collect::<Vec<_>>().join(", "),
        })
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a `ModuleRef` names nothing in the registry it is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("module '{name}' is not registered (known: {known})")]
pub struct UnknownModule {
    pub name: String,
    pub known: String,
}

/// Name → backend table consulted when a `ModuleRef` is used.
#[derive(Debug, Clone)]
pub struct ModuleRegistry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for ModuleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ModuleRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register `backend` under `name`, replacing any earlier registration.
    pub fn with(mut self, name: impl Into<String>, backend: T) -> Self {
        self.entries.insert(name.into(), backend);
        self
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
