//! `address/prefix-length` parsing and dotted-decimal subnet masks.

use crate::{Error, Result};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 address with its network prefix length, e.g. `10.0.0.1/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    pub address: Ipv4Addr,
    pub prefix: u8,
}

impl Cidr {
    /// Parses `x.x.x.x/n`. The `/n` suffix is mandatory.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidCidr {
            cidr: text.to_string(),
        };

        let (addr, prefix) = text.trim().split_once('/').ok_or_else(invalid)?;
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
        if prefix > 32 {
            return Err(invalid());
        }
        let address: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
        Ok(Self { address, prefix })
    }

    pub fn subnet_mask(&self) -> Ipv4Addr {
        subnet_mask_for_prefix(self.prefix)
    }

    /// `(ip, subnet)` as stored on an interface.
    pub fn to_interface_address(&self) -> (String, String) {
        (self.address.to_string(), self.subnet_mask().to_string())
    }
}

impl FromStr for Cidr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

/// `prefix` one-bits followed by `32 - prefix` zero-bits. Prefixes above 32 saturate.
pub fn subnet_mask_for_prefix(prefix: u8) -> Ipv4Addr {
    let bits = match prefix.min(32) {
        0 => 0u32,
        n => u32::MAX << (32 - u32::from(n)),
    };
    Ipv4Addr::from(bits)
}

/// Splits the free-text CIDR field of an interface slot into `(ip, subnet)`.
/// An empty field leaves the interface unaddressed.
pub(crate) fn interface_address(cidr: &str) -> Result<(String, String)> {
    if cidr.trim().is_empty() {
        return Ok((String::new(), String::new()));
    }
    Ok(Cidr::parse(cidr)?.to_interface_address())
}
