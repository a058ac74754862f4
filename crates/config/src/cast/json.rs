//! JSON caster.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::CastError;
use crate::types::{Atom, MapKey, Value, ValueKind};

/// Top-level shape a JSON field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonShape {
    List,
    Map,
}

impl JsonShape {
    pub(crate) fn kind(self) -> ValueKind {
        match self {
            Self::List => ValueKind::List,
            Self::Map => ValueKind::Map,
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Map => f.write_str("map"),
        }
    }
}

/// How object keys are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    #[default]
    Strings,
    Atoms,
}

impl fmt::Display for KeyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strings => f.write_str("string"),
            Self::Atoms => f.write_str("atom"),
        }
    }
}

/// Parse JSON text whose top level must be `shape`.
///
/// `None` passes through as `Value::Nil` without invoking the parser.
pub fn to_json(raw: Option<&str>, shape: JsonShape, keys: KeyStyle) -> Result<Value, CastError> {
    let Some(raw) = raw else {
        return Ok(Value::Nil);
    };

    let parsed: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CastError::InvalidJson {
            reason: e.to_string(),
        })?;

    let shape_matches = matches!(
        (shape, &parsed),
        (JsonShape::List, serde_json::Value::Array(_))
            | (JsonShape::Map, serde_json::Value::Object(_))
    );
    if !shape_matches {
        return Err(CastError::InvalidJson {
            reason: format!("expected a JSON {}, found {}", shape, describe(&parsed)),
        });
    }

    Ok(convert(parsed, keys))
}

fn describe(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a map",
    }
}

fn convert(value: serde_json::Value, keys: KeyStyle) -> Value {
    match value {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(flag) => Value::Bool(flag),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(text) => Value::Text(text),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(|v| convert(v, keys)).collect())
        }
        serde_json::Value::Object(object) => {
            let map: BTreeMap<MapKey, Value> = object
                .into_iter()
                .map(|(k, v)| {
                    let key = match keys {
                        KeyStyle::Atoms => MapKey::Atom(Atom::new(k)),
                        KeyStyle::Strings => MapKey::Text(k),
                    };
                    (key, convert(v, keys))
                })
                .collect();
            Value::Map(map)
        }
    }
}
