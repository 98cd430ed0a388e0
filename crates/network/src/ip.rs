use serde::Serialize;

use blueprint_core::{DomainError, DomainResult, ValueObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Ipv4,
    Ipv6,
}

/// An IP address with the protocol inferred from its textual length.
///
/// Addresses up to 15 characters (`255.255.255.255`) are IPv4, longer ones IPv6.
/// The text itself is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ip {
    address: String,
    protocol: Protocol,
}

impl Ip {
    const MAX_IPV4_LEN: usize = 15;

    pub fn new(address: impl Into<String>) -> DomainResult<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(DomainError::validation("Null IP address"));
        }
        let protocol = if address.len() <= Self::MAX_IPV4_LEN {
            Protocol::Ipv4
        } else {
            Protocol::Ipv6
        };
        Ok(Self { address, protocol })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }
}

impl ValueObject for Ip {}

impl core::fmt::Display for Ip {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.address)
    }
}
