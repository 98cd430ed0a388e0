use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_core::{DomainError, DomainResult, Entity, impl_uuid_newtype};

use crate::ip::Ip;
use crate::location::Location;
use crate::network::{MAXIMUM_ALLOWED_NETWORKS, Network};
use crate::router::{Model, Vendor};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchId(Uuid);

impl_uuid_newtype!(SwitchId, "SwitchId");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchType {
    Layer2,
    Layer3,
}

/// A switch attached to an edge router.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Switch {
    id: SwitchId,
    vendor: Vendor,
    model: Model,
    ip: Ip,
    location: Location,
    switch_type: SwitchType,
    networks: Vec<Network>,
}

impl Switch {
    pub fn new(vendor: Vendor, model: Model, ip: Ip, location: Location, switch_type: SwitchType) -> Self {
        Self {
            id: SwitchId::new(),
            vendor,
            model,
            ip,
            location,
            switch_type,
            networks: Vec::new(),
        }
    }

    pub fn ip(&self) -> &Ip {
        &self.ip
    }

    pub fn switch_type(&self) -> SwitchType {
        self.switch_type
    }

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn has_networks(&self) -> bool {
        !self.networks.is_empty()
    }

    /// Attach a network; its address must be unused and the switch not full.
    pub fn add_network(&mut self, network: Network) -> DomainResult<()> {
        if self.networks.iter().any(|n| n.address() == network.address()) {
            return Err(DomainError::invariant("Address already exist"));
        }
        if self.networks.len() >= MAXIMUM_ALLOWED_NETWORKS {
            return Err(DomainError::invariant(format!(
                "a switch holds at most {MAXIMUM_ALLOWED_NETWORKS} networks"
            )));
        }
        self.networks.push(network);
        Ok(())
    }

    pub fn remove_network(&mut self, name: &str) -> DomainResult<()> {
        let before = self.networks.len();
        self.networks.retain(|n| n.name() != name);
        if self.networks.len() == before {
            return Err(DomainError::not_found("Network", name));
        }
        Ok(())
    }
}

impl Entity for Switch {
    type Id = SwitchId;

    fn id(&self) -> &SwitchId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch() -> Switch {
        crate::router::fixtures::switch("20.0.0.100")
    }

    fn network(address: &str, name: &str) -> Network {
        Network::new(Ip::new(address).unwrap(), name, 8).unwrap()
    }

    #[test]
    fn duplicate_address_is_rejected() {
        let mut s = switch();
        s.add_network(network("20.0.0.0", "a")).unwrap();

        let err = s.add_network(network("20.0.0.0", "b")).unwrap_err();
        assert_eq!(err, DomainError::invariant("Address already exist"));
        assert_eq!(s.networks().len(), 1);
    }

    #[test]
    fn at_most_six_networks() {
        let mut s = switch();
        for i in 0..MAXIMUM_ALLOWED_NETWORKS {
            s.add_network(network(&format!("20.{i}.0.0"), &format!("n{i}"))).unwrap();
        }
        assert!(s.add_network(network("30.0.0.0", "extra")).is_err());
    }

    #[test]
    fn removing_unknown_network_is_not_found() {
        let mut s = switch();
        s.add_network(network("20.0.0.0", "a")).unwrap();
        s.remove_network("a").unwrap();
        assert_eq!(s.remove_network("a").unwrap_err().code(), "not_found");
    }
}
