//! The typed value universe.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::address::IpValue;
use super::module_ref::ModuleRef;

/// A symbolic name (an interned-style identifier rather than free text).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atom(String);

impl Atom {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Key of a map value: JSON objects produce text keys unless atom keys were requested.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKey {
    Atom(Atom),
    Text(String),
}

impl MapKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Atom(atom) => atom.as_str(),
            Self::Text(text) => text,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(atom) => write!(f, "{}", atom),
            Self::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// A resolved, typed configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Nil,
    Atom(Atom),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(#[serde(with = "map_entries")] BTreeMap<MapKey, Value>),
    Module(ModuleRef),
    Ip(IpValue),
}

/// Coarse type tag used to check schema defaults against their caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Nil,
    Atom,
    Bool,
    Integer,
    Float,
    Text,
    List,
    Map,
    Module,
    Ip,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Atom => "atom",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "string",
            Self::List => "list",
            Self::Map => "map",
            Self::Module => "module reference",
            Self::Ip => "IP address",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(Atom::new(name))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Atom(_) => ValueKind::Atom,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Module(_) => ValueKind::Module,
            Self::Ip(_) => ValueKind::Ip,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<MapKey, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleRef> {
        match self {
            Self::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn as_ip(&self) -> Option<&IpValue> {
        match self {
            Self::Ip(ip) => Some(ip),
            _ => None,
        }
    }

    /// Render as natural JSON for display: atoms and module references become
    /// strings, addresses their canonical text, maps JSON objects.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Nil => Json::Null,
            Self::Atom(atom) => Json::String(atom.as_str().to_string()),
            Self::Bool(flag) => Json::Bool(*flag),
            Self::Integer(n) => Json::from(*n),
            // Non-finite floats have no JSON form.
            Self::Float(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::Text(text) => Json::String(text.clone()),
            Self::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Map(map) => Json::Object(
                map.iter()
                    .map(|(key, value)| (key.as_str().to_string(), value.to_json()))
                    .collect(),
            ),
            Self::Module(module) => Json::String(module.name().to_string()),
            Self::Ip(ip) => Json::String(ip.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Atom(atom) => write!(f, "{}", atom),
            Self::Bool(flag) => write!(f, "{}", flag),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{:?}", n),
            Self::Text(text) => write!(f, "{:?}", text),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Self::Module(module) => write!(f, "{}", module),
            Self::Ip(ip) => write!(f, "{}", ip),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Atom> for Value {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<IpValue> for Value {
    fn from(ip: IpValue) -> Self {
        Self::Ip(ip)
    }
}

impl From<ModuleRef> for Value {
    fn from(module: ModuleRef) -> Self {
        Self::Module(module)
    }
}

/// Maps serialize as `[key, value]` pairs because `MapKey` is not a JSON string.
mod map_entries {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    use super::{MapKey, Value};

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<MapKey, Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<MapKey, Value>, D::Error> {
        let entries: Vec<(MapKey, Value)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;

    #[test]
    fn test_to_json_renders_atoms_and_addresses_as_strings() {
        let mut map = BTreeMap::new();
        map.insert(MapKey::Atom(Atom::new("mode")), Value::atom("server"));
        map.insert(
            MapKey::Text("proxy".to_string()),
            Value::Ip(IpValue::Address(Address::V4([10, 0, 0, 1]))),
        );

        let json = Value::Map(map).to_json();
        assert_eq!(
            json,
            serde_json::json!({ "mode": "server", "proxy": "10.0.0.1" })
        );
    }

    #[test]
    fn test_display_is_compact() {
        let value = Value::List(vec![Value::atom("cat"), Value::text("dog"), Value::Nil]);
        assert_eq!(value.to_string(), r#"[:cat, "dog", nil]"#);
    }

    #[test]
    fn test_serde_roundtrip_preserves_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(MapKey::Atom(Atom::new("user")), Value::text("svc"));
        map.insert(MapKey::Text("port".to_string()), Value::Integer(5432));
        let value = Value::Map(map);

        let encoded = serde_json::to_string(&value).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::Nil.kind(), ValueKind::Nil);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Float);
        assert_eq!(ValueKind::Ip.to_string(), "IP address");
    }
}
