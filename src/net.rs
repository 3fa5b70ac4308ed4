//! Network address types shared across the topology model.
//!
//! Hardware and IPv6 addresses are typed so a built topology can never hold
//! an unparseable address. Both types serialize as their usual textual
//! forms.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// Errors that can occur while parsing addresses from text
#[derive(Debug, thiserror::Error)]
pub enum AddrError {
    #[error("Invalid MAC address: {text}")]
    InvalidMac { text: String },

    #[error("Invalid IPv6 address with prefix: {text}")]
    InvalidCidr { text: String },

    #[error("Invalid IPv6 prefix length: {len}")]
    InvalidPrefixLen { len: u32 },
}

/// A 48-bit hardware address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr {
    bytes: [u8; 6],
}

impl MacAddr {
    pub const fn from_bytes(bytes: [u8; 6]) -> MacAddr {
        MacAddr { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bytes;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddr({})", self)
    }
}

impl FromStr for MacAddr {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddrError::InvalidMac {
            text: s.to_string(),
        };
        let mut bytes = [0u8; 6];
        let mut parts = s.split(':');
        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 2 {
                return Err(invalid());
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(MacAddr { bytes })
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// An IPv6 address with prefix length, e.g. `2001:1:1::1/64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Cidr {
    addr: Ipv6Addr,
    prefix_len: u8,
}

impl Ipv6Cidr {
    /// Pair an address with its prefix length. Prefix lengths above 128 are
    /// rejected when parsing; constructed values are trusted.
    pub const fn new(addr: Ipv6Addr, prefix_len: u8) -> Ipv6Cidr {
        Ipv6Cidr { addr, prefix_len }
    }

    /// The bare address, without its prefix length.
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for Ipv6Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl fmt::Debug for Ipv6Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ipv6Cidr({})", self)
    }
}

impl FromStr for Ipv6Cidr {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddrError::InvalidCidr {
            text: s.to_string(),
        };
        let (addr, prefix) = s.split_once('/').ok_or_else(invalid)?;
        let addr: Ipv6Addr = addr.parse().map_err(|_| invalid())?;
        let prefix_len: u32 = prefix.parse().map_err(|_| invalid())?;
        if prefix_len > 128 {
            return Err(AddrError::InvalidPrefixLen { len: prefix_len });
        }
        Ok(Ipv6Cidr::new(addr, prefix_len as u8))
    }
}

impl Serialize for Ipv6Cidr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6Cidr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
