use serde::Serialize;

use blueprint_core::{DomainError, DomainResult, ValueObject};

use crate::ip::Ip;

/// Smallest CIDR prefix a network may use.
pub const MINIMUM_ALLOWED_CIDR: u8 = 8;

/// Upper bound on networks attached to a single switch.
pub const MAXIMUM_ALLOWED_NETWORKS: usize = 6;

/// A network configured on a switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    address: Ip,
    name: String,
    cidr: u8,
}

impl Network {
    pub fn new(address: Ip, name: impl Into<String>, cidr: u8) -> DomainResult<Self> {
        if cidr < MINIMUM_ALLOWED_CIDR {
            return Err(DomainError::validation(format!("CIDR is below {MINIMUM_ALLOWED_CIDR}")));
        }
        Ok(Self {
            address,
            name: name.into(),
            cidr,
        })
    }

    pub fn address(&self) -> &Ip {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cidr(&self) -> u8 {
        self.cidr
    }
}

impl ValueObject for Network {}
