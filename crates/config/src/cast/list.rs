//! Comma-separated list caster.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CastError, address, scalar};
use crate::types::{Value, ValueKind};

/// Transform applied to every surviving list element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCaster {
    #[default]
    Text,
    Atom,
    Integer,
    Float,
    Boolean,
    IpOrCidr,
}

impl ItemCaster {
    pub fn apply(self, piece: &str) -> Result<Value, CastError> {
        match self {
            Self::Text => Ok(Value::text(piece)),
            Self::Atom => Ok(Value::Atom(scalar::to_atom(piece))),
            Self::Integer => scalar::to_integer(piece).map(Value::Integer),
            Self::Float => scalar::to_float(piece).map(Value::Float),
            Self::Boolean => Ok(Value::Bool(scalar::to_boolean(piece))),
            Self::IpOrCidr => address::to_ip_or_cidr(piece).map(Value::Ip),
        }
    }

    pub(crate) fn kind(self) -> ValueKind {
        match self {
            Self::Text => ValueKind::Text,
            Self::Atom => ValueKind::Atom,
            Self::Integer => ValueKind::Integer,
            Self::Float => ValueKind::Float,
            Self::Boolean => ValueKind::Bool,
            Self::IpOrCidr => ValueKind::Ip,
        }
    }
}

impl fmt::Display for ItemCaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "strings",
            Self::Atom => "atoms",
            Self::Integer => "integers",
            Self::Float => "floats",
            Self::Boolean => "booleans",
            Self::IpOrCidr => "IP addresses",
        };
        f.write_str(name)
    }
}

/// Split a comma list into trimmed, non-empty pieces, in order.
///
/// One leading and one trailing `"` are stripped first, so a value quoted as a
/// whole still splits.
pub fn split_comma_list(raw: &str) -> Vec<&str> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    let raw = raw.strip_suffix('"').unwrap_or(raw);

    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Split `raw` and cast every piece with `item`; the first failing piece aborts.
pub fn to_comma_list(raw: &str, item: ItemCaster) -> Result<Vec<Value>, CastError> {
    split_comma_list(raw)
        .into_iter()
        .map(|piece| item.apply(piece))
        .collect()
}
