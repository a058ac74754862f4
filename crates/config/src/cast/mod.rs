//! Casting library: raw strings into typed values.
//!
//! Responsibilities:
//! - Provide the individual casting primitives (`to_boolean`, `to_json`, `to_ip_or_cidr`, ...).
//! - Define the closed `Caster` enumeration that schema fields reference as data.
//! - Dispatch a `Caster` through one exhaustive match.
//!
//! Does NOT handle:
//! - Looking up raw values or applying required/default policy (see `schema::evaluator`).
//! - Post-cast range or membership checks (see `validate`).
//!
//! Invariants:
//! - Total casters (`to_string`, `to_atom`, `to_boolean`, `to_module_reference`) never fail.
//! - Cast errors never contain the raw input, which may be a secret.
//! - `nil` input passes through `to_json` and `optionally_decode` untouched.

mod address;
mod decode;
mod json;
mod list;
mod scalar;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::{Value, ValueKind};

pub use address::to_ip_or_cidr;
pub use decode::optionally_decode;
pub use json::{JsonShape, KeyStyle, to_json};
pub use list::{ItemCaster, split_comma_list, to_comma_list};
pub use scalar::{
    is_recognized_boolean, to_atom, to_boolean, to_float, to_integer, to_module_reference,
    to_string,
};

/// Why a fallible caster rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("invalid number: {reason}")]
    InvalidNumber { reason: String },

    #[error("invalid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("invalid IP address or CIDR: {reason}")]
    InvalidAddress { reason: String },

    #[error("invalid encoding: expected plain text or base64:-prefixed data")]
    InvalidEncoding,
}

/// Closed set of caster kinds a schema field can name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Caster {
    /// Plain text, unchanged.
    String,
    Atom,
    Boolean,
    Integer,
    Float,
    Json {
        shape: JsonShape,
        #[serde(default)]
        keys: KeyStyle,
    },
    CommaList {
        #[serde(default)]
        item: ItemCaster,
    },
    ModuleRef,
    OptionalDecode,
    IpOrCidr,
}

impl Caster {
    /// Convert a present raw value.
    pub fn cast(&self, raw: &str) -> Result<Value, CastError> {
        match self {
            Self::String => Ok(Value::Text(to_string(raw))),
            Self::Atom => Ok(Value::Atom(to_atom(raw))),
            Self::Boolean => Ok(Value::Bool(to_boolean(raw))),
            Self::Integer => to_integer(raw).map(Value::Integer),
            Self::Float => to_float(raw).map(Value::Float),
            Self::Json { shape, keys } => to_json(Some(raw), *shape, *keys),
            Self::CommaList { item } => to_comma_list(raw, *item).map(Value::List),
            Self::ModuleRef => Ok(Value::Module(to_module_reference(raw))),
            Self::OptionalDecode => {
                Ok(optionally_decode(Some(raw))?.map_or(Value::Nil, Value::Text))
            }
            Self::IpOrCidr => to_ip_or_cidr(raw).map(Value::Ip),
        }
    }

    /// Whether `value` has the shape this caster produces. `nil` always fits,
    /// since every optional field may resolve to nothing.
    pub fn produces(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Nil) => true,
            (Self::CommaList { item }, Value::List(items)) => {
                items.iter().all(|v| v.kind() == item.kind())
            }
            (caster, v) => caster.kind() == v.kind(),
        }
    }

    /// Kind of a successful, non-nil result.
    fn kind(&self) -> ValueKind {
        match self {
            Self::String | Self::OptionalDecode => ValueKind::Text,
            Self::Atom => ValueKind::Atom,
            Self::Boolean => ValueKind::Bool,
            Self::Integer => ValueKind::Integer,
            Self::Float => ValueKind::Float,
            Self::Json { shape, .. } => shape.kind(),
            Self::CommaList { .. } => ValueKind::List,
            Self::ModuleRef => ValueKind::Module,
            Self::IpOrCidr => ValueKind::Ip,
        }
    }
}

impl fmt::Display for Caster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Atom => f.write_str("atom"),
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Json { shape, keys } => write!(f, "json {} ({} keys)", shape, keys),
            Self::CommaList { item } => write!(f, "comma list of {}", item),
            Self::ModuleRef => f.write_str("module reference"),
            Self::OptionalDecode => f.write_str("optionally encoded string"),
            Self::IpOrCidr => f.write_str("IP address or CIDR"),
        }
    }
}
