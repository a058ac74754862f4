//! IP address and CIDR caster.

use std::net::IpAddr;

use super::CastError;
use crate::types::{Address, IpValue};

/// Parse `addr` or `addr/prefix`.
///
/// The address must be a strict IPv4 (four octets) or IPv6 (eight segments,
/// `::` compression allowed) literal. The prefix must be a non-negative
/// integer; its range is checked by `validate::validate_ip`.
pub fn to_ip_or_cidr(raw: &str) -> Result<IpValue, CastError> {
    match raw.split_once('/') {
        None => parse_address(raw).map(IpValue::Address),
        Some((address, prefix)) => {
            let address = parse_address(address)?;
            let prefix = parse_prefix(prefix)?;
            Ok(IpValue::Cidr { address, prefix })
        }
    }
}

/// Canonical decimal only: no sign, no leading zeros, no whitespace.
fn parse_prefix(raw: &str) -> Result<u32, CastError> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    canonical
        .then(|| raw.parse::<u32>().ok())
        .flatten()
        .ok_or_else(|| CastError::InvalidAddress {
            reason: "prefix length must be a non-negative integer".to_string(),
        })
}

fn parse_address(raw: &str) -> Result<Address, CastError> {
    raw.parse::<IpAddr>()
        .map(Address::from)
        .map_err(|_| CastError::InvalidAddress {
            reason: "expected an IPv4 or IPv6 literal".to_string(),
        })
}
