use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_core::{AggregateRoot, DomainError, DomainResult, Entity, SurrogateId, impl_uuid_newtype};

use crate::ip::Ip;
use crate::location::Location;
use crate::switch::{Switch, SwitchId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouterId(Uuid);

impl_uuid_newtype!(RouterId, "RouterId");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vendor {
    Cisco,
    Netgear,
    Hp,
    Tplink,
    Dlink,
    Juniper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Model {
    Xyz0001,
    Xyz0002,
    Xyz0003,
    Xyz0004,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouterType {
    Core,
    Edge,
}

/// What a router holds below it: core routers aggregate other routers,
/// edge routers terminate switches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "routerType", rename_all = "UPPERCASE")]
pub enum RouterKind {
    Core { routers: BTreeSet<RouterId> },
    Edge { switches: BTreeMap<SwitchId, Switch> },
}

impl RouterKind {
    pub fn empty(router_type: RouterType) -> Self {
        match router_type {
            RouterType::Core => Self::Core {
                routers: BTreeSet::new(),
            },
            RouterType::Edge => Self::Edge {
                switches: BTreeMap::new(),
            },
        }
    }

    pub fn router_type(&self) -> RouterType {
        match self {
            Self::Core { .. } => RouterType::Core,
            Self::Edge { .. } => RouterType::Edge,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Core { routers } => routers.is_empty(),
            Self::Edge { switches } => switches.is_empty(),
        }
    }
}

/// Aggregate root: Router.
///
/// # Invariants
/// - A core router only holds routers located in its own country and never one
///   sharing its IP address, nor itself.
/// - A router has at most one parent core router, and core routers never
///   contain each other.
/// - A router is detached from a core router only once it holds nothing.
/// - A switch leaves an edge router only once it carries no networks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Router {
    #[serde(skip)]
    surrogate_id: Option<SurrogateId>,
    id: RouterId,
    vendor: Vendor,
    model: Model,
    ip: Ip,
    location: Location,
    parent_core_id: Option<RouterId>,
    #[serde(flatten)]
    kind: RouterKind,
}

impl Router {
    pub fn new(vendor: Vendor, model: Model, ip: Ip, location: Location, router_type: RouterType) -> Self {
        Self {
            surrogate_id: None,
            id: RouterId::new(),
            vendor,
            model,
            ip,
            location,
            parent_core_id: None,
            kind: RouterKind::empty(router_type),
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn ip(&self) -> &Ip {
        &self.ip
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn parent_core_id(&self) -> Option<RouterId> {
        self.parent_core_id
    }

    pub fn kind(&self) -> &RouterKind {
        &self.kind
    }

    pub fn router_type(&self) -> RouterType {
        self.kind.router_type()
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn change_location(&mut self, location: Location) {
        self.location = location;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Core routers
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach `child` under this core router and record the link on the child.
    pub fn add_router(&mut self, child: &mut Router) -> DomainResult<()> {
        if child.id == self.id {
            return Err(DomainError::invariant("a router cannot be attached to itself"));
        }
        if !self.location.same_country_as(&child.location) {
            return Err(DomainError::invariant("routers must be located in the same country"));
        }
        if self.ip == child.ip {
            return Err(DomainError::invariant("routers must not share the same IP address"));
        }
        if let Some(parent) = child.parent_core_id
            && parent != self.id
        {
            return Err(DomainError::invariant(format!(
                "router {} is already attached to core router {parent}",
                child.id
            )));
        }
        if let RouterKind::Core { routers } = &child.kind
            && routers.contains(&self.id)
        {
            return Err(DomainError::invariant(format!(
                "router {} already contains core router {}",
                child.id, self.id
            )));
        }
        let RouterKind::Core { routers } = &mut self.kind else {
            return Err(DomainError::invariant(format!("router {} is not a core router", self.id)));
        };
        routers.insert(child.id);
        child.parent_core_id = Some(self.id);
        Ok(())
    }

    /// Detach an empty `child` from this core router.
    pub fn remove_router(&mut self, child: &mut Router) -> DomainResult<()> {
        let RouterKind::Core { routers } = &mut self.kind else {
            return Err(DomainError::invariant(format!("router {} is not a core router", self.id)));
        };
        if !routers.contains(&child.id) {
            return Err(DomainError::not_found("Router", child.id));
        }
        match &child.kind {
            RouterKind::Core { routers } if !routers.is_empty() => {
                return Err(DomainError::invariant("a core router with routers cannot be removed"));
            }
            RouterKind::Edge { switches } if !switches.is_empty() => {
                return Err(DomainError::invariant("an edge router with switches cannot be removed"));
            }
            _ => {}
        }
        routers.remove(&child.id);
        child.parent_core_id = None;
        Ok(())
    }

    /// Forget a child id without inspecting the child; used when the child
    /// itself is deleted.
    pub(crate) fn detach(&mut self, child: RouterId) {
        if let RouterKind::Core { routers } = &mut self.kind {
            routers.remove(&child);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edge routers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_switch(&mut self, switch: Switch) -> DomainResult<()> {
        let RouterKind::Edge { switches } = &mut self.kind else {
            return Err(DomainError::validation("Please inform the id of an edge router to add a switch"));
        };
        switches.insert(*switch.id(), switch);
        Ok(())
    }

    pub fn remove_switch(&mut self, switch_id: SwitchId) -> DomainResult<Switch> {
        let RouterKind::Edge { switches } = &mut self.kind else {
            return Err(DomainError::invariant(format!("router {} is not an edge router", self.id)));
        };
        match switches.get(&switch_id) {
            None => Err(DomainError::not_found("Switch", switch_id)),
            Some(switch) if switch.has_networks() => Err(DomainError::invariant(
                "a switch with networks cannot be removed",
            )),
            Some(_) => switches
                .remove(&switch_id)
                .ok_or_else(|| DomainError::not_found("Switch", switch_id)),
        }
    }

    pub fn switch(&self, switch_id: SwitchId) -> Option<&Switch> {
        match &self.kind {
            RouterKind::Edge { switches } => switches.get(&switch_id),
            RouterKind::Core { .. } => None,
        }
    }

    pub fn switch_mut(&mut self, switch_id: SwitchId) -> Option<&mut Switch> {
        match &mut self.kind {
            RouterKind::Edge { switches } => switches.get_mut(&switch_id),
            RouterKind::Core { .. } => None,
        }
    }
}

impl AggregateRoot for Router {
    type Id = RouterId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn surrogate_id(&self) -> Option<SurrogateId> {
        self.surrogate_id
    }

    fn assign_surrogate_id(&mut self, id: SurrogateId) {
        self.surrogate_id = Some(id);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::switch::SwitchType;

    pub fn location(country: &str) -> Location {
        Location {
            address: "Amos Ln".into(),
            city: "Tully".into(),
            state: "NY".into(),
            zipcode: 13159,
            country: country.into(),
            latitude: 42.79731,
            longitude: -76.13075,
        }
    }

    pub fn router(router_type: RouterType, ip: &str, country: &str) -> Router {
        Router::new(
            Vendor::Cisco,
            Model::Xyz0001,
            Ip::new(ip).unwrap(),
            location(country),
            router_type,
        )
    }

    pub fn switch(ip: &str) -> Switch {
        Switch::new(
            Vendor::Hp,
            Model::Xyz0004,
            Ip::new(ip).unwrap(),
            location("United States"),
            SwitchType::Layer3,
        )
    }
}
