//! The resolved, immutable configuration snapshot.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::REDACTED;
use crate::types::{Atom, ModuleRef, Value};

/// Resolved values of one namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: BTreeMap<String, Value>,
    sensitive: BTreeSet<String>,
}

impl Namespace {
    pub(crate) fn insert(&mut self, key: String, value: Value, sensitive: bool) {
        if sensitive {
            self.sensitive.insert(key.clone());
        }
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.sensitive.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object of this namespace with sensitive non-nil values redacted.
    pub fn to_redacted_json(&self) -> serde_json::Value {
        let object = self
            .values
            .iter()
            .map(|(key, value)| {
                let rendered = if self.is_sensitive(key) && !value.is_nil() {
                    serde_json::Value::String(REDACTED.to_string())
                } else {
                    value.to_json()
                };
                (key.clone(), rendered)
            })
            .collect();
        serde_json::Value::Object(object)
    }
}

/// Namespace → key → typed value, built once by `schema::evaluate`.
///
/// There are no mutators: consumers share it by reference (usually behind an
/// `Arc`) for the life of the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot {
    namespaces: BTreeMap<String, Namespace>,
}

impl ConfigSnapshot {
    pub(crate) fn from_namespaces(namespaces: BTreeMap<String, Namespace>) -> Self {
        Self { namespaces }
    }

    /// Value of `key` in `namespace`; `None` if the schema never declared it.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.namespaces.get(namespace)?.get(key)
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &Namespace)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn get_str(&self, namespace: &str, key: &str) -> Option<&str> {
        self.get(namespace, key)?.as_str()
    }

    pub fn get_bool(&self, namespace: &str, key: &str) -> Option<bool> {
        self.get(namespace, key)?.as_bool()
    }

    pub fn get_integer(&self, namespace: &str, key: &str) -> Option<i64> {
        self.get(namespace, key)?.as_integer()
    }

    pub fn get_atom(&self, namespace: &str, key: &str) -> Option<&Atom> {
        self.get(namespace, key)?.as_atom()
    }

    pub fn get_list(&self, namespace: &str, key: &str) -> Option<&[Value]> {
        self.get(namespace, key)?.as_list()
    }

    pub fn get_module(&self, namespace: &str, key: &str) -> Option<&ModuleRef> {
        self.get(namespace, key)?.as_module()
    }

    /// Whole snapshot as a JSON object of namespaces, sensitive values redacted.
    pub fn to_redacted_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.namespaces
                .iter()
                .map(|(name, ns)| (name.clone(), ns.to_redacted_json()))
                .collect(),
        )
    }
}
