use serde::Deserialize;

use blueprint_core::{DomainResult, Violations};
use blueprint_events::Command;

use crate::location::Location;
use crate::router::{Model, RouterId, RouterType, Vendor};
use crate::switch::{SwitchId, SwitchType};

fn check_location(v: &mut Violations, location: &Location) {
    v.not_blank("location.country", &location.country)
        .range("location.latitude", location.latitude, -90.0, 90.0)
        .range("location.longitude", location.longitude, -180.0, 180.0);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouter {
    pub vendor: Vendor,
    pub model: Model,
    pub ip: String,
    pub location: Location,
    pub router_type: RouterType,
}

impl Command for CreateRouter {
    fn command_type(&self) -> &'static str {
        "network.create_router"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("ip", &self.ip);
        check_location(&mut v, &self.location);
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieveRouter {
    pub id: RouterId,
}

/// Delete a router that holds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveRouter {
    pub id: RouterId,
}

impl Command for RemoveRouter {
    fn command_type(&self) -> &'static str {
        "network.remove_router"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddRouterToCoreRouter {
    pub router_id: RouterId,
    pub core_router_id: RouterId,
}

impl Command for AddRouterToCoreRouter {
    fn command_type(&self) -> &'static str {
        "network.add_router_to_core"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveRouterFromCoreRouter {
    pub router_id: RouterId,
    pub core_router_id: RouterId,
}

impl Command for RemoveRouterFromCoreRouter {
    fn command_type(&self) -> &'static str {
        "network.remove_router_from_core"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLocation {
    pub router_id: RouterId,
    pub location: Location,
}

impl Command for ChangeLocation {
    fn command_type(&self) -> &'static str {
        "network.change_location"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        check_location(&mut v, &self.location);
        v.finish()
    }
}

/// All routers, optionally only those of one type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListRouters {
    pub router_type: Option<RouterType>,
}

/// Create a switch and attach it to an edge router.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSwitch {
    pub edge_router_id: RouterId,
    pub vendor: Vendor,
    pub model: Model,
    pub ip: String,
    pub location: Location,
    pub switch_type: SwitchType,
}

impl Command for CreateSwitch {
    fn command_type(&self) -> &'static str {
        "network.create_switch"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("ip", &self.ip);
        check_location(&mut v, &self.location);
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieveSwitch {
    pub id: SwitchId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveSwitchFromEdgeRouter {
    pub switch_id: SwitchId,
    pub edge_router_id: RouterId,
}

impl Command for RemoveSwitchFromEdgeRouter {
    fn command_type(&self) -> &'static str {
        "network.remove_switch"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNetworkToSwitch {
    pub switch_id: SwitchId,
    pub address: String,
    pub name: String,
    pub cidr: u8,
}

impl Command for AddNetworkToSwitch {
    fn command_type(&self) -> &'static str {
        "network.add_network"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("address", &self.address)
            .not_blank("name", &self.name);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveNetworkFromSwitch {
    pub switch_id: SwitchId,
    pub network_name: String,
}

impl Command for RemoveNetworkFromSwitch {
    fn command_type(&self) -> &'static str {
        "network.remove_network"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("network_name", &self.network_name);
        v.finish()
    }
}
