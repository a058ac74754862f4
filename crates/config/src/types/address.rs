//! IP address and CIDR value types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A parsed IP address as a fixed-arity tuple of segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Address {
    /// Four octets, e.g. `(192, 168, 0, 1)`.
    V4([u8; 4]),
    /// Eight 16-bit segments, e.g. `(1, 0, 0, 0, 0, 0, 0, 1)`.
    V6([u16; 8]),
}

impl Address {
    /// Number of segments in the tuple (4 or 8).
    pub fn segment_count(&self) -> usize {
        match self {
            Self::V4(_) => 4,
            Self::V6(_) => 8,
        }
    }

    /// Largest prefix length this address family allows.
    pub fn max_prefix(&self) -> u32 {
        match self {
            Self::V4(_) => 32,
            Self::V6(_) => 128,
        }
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match *self {
            Self::V4(octets) => IpAddr::V4(Ipv4Addr::from(octets)),
            Self::V6(segments) => IpAddr::V6(Ipv6Addr::from(segments)),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::V4(v4.octets()),
            IpAddr::V6(v6) => Self::V6(v6.segments()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // std renders IPv6 in the RFC 5952 compressed form.
        write!(f, "{}", self.to_ip_addr())
    }
}

/// Result of casting an IP-or-CIDR literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpValue {
    /// A bare address.
    Address(Address),
    /// An address paired with a prefix length. The prefix is only range-checked
    /// by `validate::validate_ip`.
    Cidr { address: Address, prefix: u32 },
}

impl IpValue {
    pub fn address(&self) -> Address {
        match *self {
            Self::Address(address) | Self::Cidr { address, .. } => address,
        }
    }

    pub fn prefix(&self) -> Option<u32> {
        match *self {
            Self::Address(_) => None,
            Self::Cidr { prefix, .. } => Some(prefix),
        }
    }
}

impl fmt::Display for IpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{}", address),
            Self::Cidr { address, prefix } => write!(f, "{}/{}", address, prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v4_display_is_dotted_quad() {
        assert_eq!(Address::V4([192, 168, 0, 1]).to_string(), "192.168.0.1");
    }

    #[test]
    fn test_v6_display_is_compressed() {
        assert_eq!(Address::V6([1, 0, 0, 0, 0, 0, 0, 1]).to_string(), "1::1");
    }

    #[test]
    fn test_cidr_display_appends_prefix() {
        let value = IpValue::Cidr {
            address: Address::V4([10, 0, 0, 0]),
            prefix: 8,
        };
        assert_eq!(value.to_string(), "10.0.0.0/8");
        assert_eq!(value.prefix(), Some(8));
        assert_eq!(value.address().segment_count(), 4);
    }
}
