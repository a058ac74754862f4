//! Validation library: composable post-cast checks.
//!
//! Responsibilities:
//! - Check cast values against invariants the caster alone cannot express
//!   (CIDR prefix bounds, integer ranges, allowed symbols).
//! - Render IP values back to their canonical text.
//!
//! Does NOT handle:
//! - Parsing raw strings (see `cast`).
//! - Attaching the failing variable name (see `schema::evaluator`).
//!
//! Invariants:
//! - Validators are pure and never modify the value they check.
//! - Every validator accepts `nil`, so optional fields without a value pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::{IpValue, Value};

/// A failed check: which rule rejected the value, and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{rule}: {message}")]
pub struct ValidationFailure {
    pub rule: String,
    pub message: String,
}

impl ValidationFailure {
    fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Accept a bare address, or a CIDR whose prefix fits the address family:
/// `0..=32` for IPv4, `1..=128` for IPv6.
pub fn validate_ip(value: IpValue) -> Result<IpValue, ValidationFailure> {
    let IpValue::Cidr { address, prefix } = value else {
        return Ok(value);
    };

    let min = if address.segment_count() == 4 { 0 } else { 1 };
    let max = address.max_prefix();
    if (min..=max).contains(&prefix) {
        Ok(value)
    } else {
        Err(ValidationFailure::new(
            "ip",
            format!("prefix length {} is outside {}..={}", prefix, min, max),
        ))
    }
}

/// Canonical text of an IP value, e.g. `192.168.0.0/24`.
pub fn ip_to_string(value: &IpValue) -> String {
    value.to_string()
}

/// Declarative post-cast check attached to a schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Validator {
    /// CIDR prefix bounds (see `validate_ip`).
    Ip,
    /// Inclusive integer bounds; a missing bound is unbounded.
    IntRange {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    /// Atom or text must be one of `values`.
    OneOf { values: Vec<String> },
    /// Text or list must not be empty.
    NonEmpty,
    /// Apply `inner` to every element of a list.
    Each { inner: Box<Validator> },
    /// Apply every validator in order; the first failure wins.
    All { validators: Vec<Validator> },
}

impl Validator {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn each(inner: Validator) -> Self {
        Self::Each {
            inner: Box::new(inner),
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if value.is_nil() {
            return Ok(());
        }

        match self {
            Self::Ip => match value {
                Value::Ip(ip) => validate_ip(*ip).map(|_| ()),
                other => Err(self.mismatch(other)),
            },
            Self::IntRange { min, max } => {
                let Value::Integer(n) = value else {
                    return Err(self.mismatch(value));
                };
                if min.is_some_and(|min| *n < min) {
                    Err(ValidationFailure::new(self.to_string(), "below the minimum"))
                } else if max.is_some_and(|max| *n > max) {
                    Err(ValidationFailure::new(self.to_string(), "above the maximum"))
                } else {
                    Ok(())
                }
            }
            Self::OneOf { values } => {
                let name = match value {
                    Value::Atom(atom) => atom.as_str(),
                    Value::Text(text) => text.as_str(),
                    other => return Err(self.mismatch(other)),
                };
                if values.iter().any(|v| v == name) {
                    Ok(())
                } else {
                    Err(ValidationFailure::new(
                        self.to_string(),
                        format!("expected one of {}", values.join(", ")),
                    ))
                }
            }
            Self::NonEmpty => {
                let empty = match value {
                    Value::Text(text) => text.trim().is_empty(),
                    Value::List(items) => items.is_empty(),
                    Value::Map(map) => map.is_empty(),
                    other => return Err(self.mismatch(other)),
                };
                if empty {
                    Err(ValidationFailure::new(self.to_string(), "must not be empty"))
                } else {
                    Ok(())
                }
            }
            Self::Each { inner } => {
                let Value::List(items) = value else {
                    return Err(self.mismatch(value));
                };
                for (index, item) in items.iter().enumerate() {
                    inner.check(item).map_err(|failure| {
                        ValidationFailure::new(
                            failure.rule,
                            format!("element {}: {}", index, failure.message),
                        )
                    })?;
                }
                Ok(())
            }
            Self::All { validators } => validators.iter().try_for_each(|v| v.check(value)),
        }
    }

    fn mismatch(&self, value: &Value) -> ValidationFailure {
        ValidationFailure::new(
            self.to_string(),
            format!("cannot check a {} value", value.kind()),
        )
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip => f.write_str("ip"),
            Self::IntRange { min, max } => {
                let bound = |b: &Option<i64>| b.map(|n| n.to_string()).unwrap_or_default();
                write!(f, "int_range({}..={})", bound(min), bound(max))
            }
            Self::OneOf { .. } => f.write_str("one_of"),
            Self::NonEmpty => f.write_str("non_empty"),
            Self::Each { inner } => write!(f, "each({})", inner),
            Self::All { validators } => {
                let names: Vec<String> = validators.iter().map(ToString::to_string).collect();
                write!(f, "all({})", names.join(", "))
            }
        }
    }
}
