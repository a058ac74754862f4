//! Scalar casters: text, atoms, booleans, numbers and module references.

use std::num::IntErrorKind;

use super::CastError;
use crate::types::{Atom, ModuleRef};

/// Identity caster for free-text values.
pub fn to_string(raw: &str) -> String {
    raw.to_string()
}

/// Create a symbolic name from the string. Never fails.
pub fn to_atom(raw: &str) -> Atom {
    Atom::new(raw)
}

/// `"1"`, `"true"` and `"yes"` in any case are true; every other string is false.
pub fn to_boolean(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Whether `raw` is one of the tokens a boolean is conventionally spelled with.
///
/// `to_boolean` maps anything outside this set to false; callers use this to
/// flag probable typos.
pub fn is_recognized_boolean(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "0" | "false" | "no" | ""
    )
}

/// Parse a strict integer literal (optional sign, decimal digits, nothing else).
pub fn to_integer(raw: &str) -> Result<i64, CastError> {
    raw.parse::<i64>().map_err(|e| {
        let reason = match e.kind() {
            IntErrorKind::Empty => "empty string is not an integer",
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                "integer literal out of range"
            }
            _ => "expected an integer literal",
        };
        CastError::InvalidNumber {
            reason: reason.to_string(),
        }
    })
}

/// Parse a strict decimal float literal.
///
/// Accepts an optional sign, digits, an optional fraction with at least one
/// digit, and an optional exponent. Integral literals such as `"3"` are
/// accepted; `inf`, `NaN`, `".5"` and `"5."` are not.
pub fn to_float(raw: &str) -> Result<f64, CastError> {
    if !is_float_literal(raw) {
        return Err(CastError::InvalidNumber {
            reason: "expected a decimal float literal".to_string(),
        });
    }
    let value = raw.parse::<f64>().map_err(|_| CastError::InvalidNumber {
        reason: "expected a decimal float literal".to_string(),
    })?;
    if !value.is_finite() {
        return Err(CastError::InvalidNumber {
            reason: "float literal out of range".to_string(),
        });
    }
    Ok(value)
}

fn is_float_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;

    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if !digits(&mut i) {
        return false;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !digits(&mut i) {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !digits(&mut i) {
            return false;
        }
    }
    i == bytes.len()
}

/// Build a reference to a named backend. Never fails; see `ModuleRef::resolve`.
pub fn to_module_reference(raw: &str) -> ModuleRef {
    ModuleRef::new(raw.trim())
}
