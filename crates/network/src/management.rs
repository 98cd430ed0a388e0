//! Use cases over the router aggregate.
//!
//! Topology endpoints are open: handlers take the caller's principal for the
//! common handler signature but do not restrict by role.

use tracing::info;

use blueprint_auth::Principal;
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Entity, Repository};
use blueprint_events::{Command, CommandHandler, QueryHandler};

use crate::commands::{
    AddNetworkToSwitch, AddRouterToCoreRouter, ChangeLocation, CreateRouter, CreateSwitch, ListRouters,
    RemoveNetworkFromSwitch, RemoveRouter, RemoveRouterFromCoreRouter, RemoveSwitchFromEdgeRouter, RetrieveRouter,
    RetrieveSwitch,
};
use crate::ip::Ip;
use crate::network::Network;
use crate::router::{Router, RouterId};
use crate::switch::{Switch, SwitchId};

fn load<R: Repository<Router>>(routers: &R, id: RouterId) -> DomainResult<Router> {
    routers.find_by_id(&id)?.ok_or_else(|| DomainError::not_found("Router", id))
}

/// The edge router currently holding `switch_id`.
fn router_holding<R: Repository<Router>>(routers: &R, switch_id: SwitchId) -> DomainResult<Router> {
    routers
        .list()?
        .into_iter()
        .find(|router| router.switch(switch_id).is_some())
        .ok_or_else(|| DomainError::not_found("Switch", switch_id))
}

/// Reject attaching `child` under `core` when `child` is `core` itself or one
/// of its ancestors.
fn ensure_acyclic<R: Repository<Router>>(routers: &R, core: &Router, child: RouterId) -> DomainResult<()> {
    let mut next = core.parent_core_id();
    while let Some(ancestor) = next {
        if ancestor == child {
            return Err(DomainError::invariant(format!(
                "attaching router {child} under core router {} would create a cycle",
                core.id()
            )));
        }
        next = load(routers, ancestor)?.parent_core_id();
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Routers
// ─────────────────────────────────────────────────────────────────────────────

pub struct RouterManagement<R> {
    routers: R,
}

impl<R> RouterManagement<R> {
    pub fn new(routers: R) -> Self {
        Self { routers }
    }
}

impl<R: Repository<Router>> CommandHandler<CreateRouter> for RouterManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, command: CreateRouter) -> DomainResult<Router> {
        command.validate()?;

        let router = Router::new(
            command.vendor,
            command.model,
            Ip::new(command.ip)?,
            command.location,
            command.router_type,
        );
        let router = self.routers.save(router)?;
        info!(router_id = %router.id(), router_type = ?router.router_type(), "router created");
        Ok(router)
    }
}

impl<R: Repository<Router>> QueryHandler<RetrieveRouter> for RouterManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, query: RetrieveRouter) -> DomainResult<Router> {
        load(&self.routers, query.id)
    }
}

impl<R: Repository<Router>> QueryHandler<ListRouters> for RouterManagement<R> {
    type Output = Vec<Router>;

    fn handle(&self, _principal: &Principal, query: ListRouters) -> DomainResult<Vec<Router>> {
        let routers = self.routers.list()?;
        Ok(match query.router_type {
            Some(wanted) => routers.into_iter().filter(|r| r.router_type() == wanted).collect(),
            None => routers,
        })
    }
}

impl<R: Repository<Router>> CommandHandler<RemoveRouter> for RouterManagement<R> {
    type Output = ();

    fn handle(&self, _principal: &Principal, command: RemoveRouter) -> DomainResult<()> {
        let router = load(&self.routers, command.id)?;
        if !router.is_empty() {
            return Err(DomainError::invariant(format!(
                "router {} still holds routers or switches",
                command.id
            )));
        }

        if let Some(parent_id) = router.parent_core_id()
            && let Some(mut parent) = self.routers.find_by_id(&parent_id)?
        {
            parent.detach(command.id);
            self.routers.save(parent)?;
        }
        self.routers.remove(&command.id)?;
        info!(router_id = %command.id, "router removed");
        Ok(())
    }
}

impl<R: Repository<Router>> CommandHandler<AddRouterToCoreRouter> for RouterManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, command: AddRouterToCoreRouter) -> DomainResult<Router> {
        let mut core = load(&self.routers, command.core_router_id)?;
        let mut child = load(&self.routers, command.router_id)?;

        ensure_acyclic(&self.routers, &core, command.router_id)?;
        core.add_router(&mut child)?;
        self.routers.save(child)?;
        self.routers.save(core)
    }
}

impl<R: Repository<Router>> CommandHandler<RemoveRouterFromCoreRouter> for RouterManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, command: RemoveRouterFromCoreRouter) -> DomainResult<Router> {
        let mut core = load(&self.routers, command.core_router_id)?;
        let mut child = load(&self.routers, command.router_id)?;

        core.remove_router(&mut child)?;
        self.routers.save(child)?;
        self.routers.save(core)
    }
}

impl<R: Repository<Router>> CommandHandler<ChangeLocation> for RouterManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, command: ChangeLocation) -> DomainResult<Router> {
        command.validate()?;

        let mut router = load(&self.routers, command.router_id)?;
        router.change_location(command.location);
        self.routers.save(router)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Switches
// ─────────────────────────────────────────────────────────────────────────────

pub struct SwitchManagement<R> {
    routers: R,
}

impl<R> SwitchManagement<R> {
    pub fn new(routers: R) -> Self {
        Self { routers }
    }
}

impl<R: Repository<Router>> CommandHandler<CreateSwitch> for SwitchManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, command: CreateSwitch) -> DomainResult<Router> {
        command.validate()?;

        let mut router = load(&self.routers, command.edge_router_id)?;
        let switch = Switch::new(
            command.vendor,
            command.model,
            Ip::new(command.ip)?,
            command.location,
            command.switch_type,
        );
        let switch_id = *switch.id();
        router.add_switch(switch)?;

        let router = self.routers.save(router)?;
        info!(%switch_id, router_id = %router.id(), "switch attached");
        Ok(router)
    }
}

impl<R: Repository<Router>> QueryHandler<RetrieveSwitch> for SwitchManagement<R> {
    type Output = Switch;

    fn handle(&self, _principal: &Principal, query: RetrieveSwitch) -> DomainResult<Switch> {
        let router = router_holding(&self.routers, query.id)?;
        router
            .switch(query.id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Switch", query.id))
    }
}

impl<R: Repository<Router>> CommandHandler<RemoveSwitchFromEdgeRouter> for SwitchManagement<R> {
    type Output = Router;

    fn handle(&self, _principal: &Principal, command: RemoveSwitchFromEdgeRouter) -> DomainResult<Router> {
        let mut router = load(&self.routers, command.edge_router_id)?;
        router.remove_switch(command.switch_id)?;
        self.routers.save(router)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Networks
// ─────────────────────────────────────────────────────────────────────────────

pub struct NetworkManagement<R> {
    routers: R,
}

impl<R> NetworkManagement<R> {
    pub fn new(routers: R) -> Self {
        Self { routers }
    }

    fn update_switch<F>(&self, switch_id: SwitchId, change: F) -> DomainResult<Switch>
    where
        R: Repository<Router>,
        F: FnOnce(&mut Switch) -> DomainResult<()>,
    {
        let mut router = router_holding(&self.routers, switch_id)?;
        let switch = router
            .switch_mut(switch_id)
            .ok_or_else(|| DomainError::not_found("Switch", switch_id))?;
        change(switch)?;
        let updated = switch.clone();

        self.routers.save(router)?;
        Ok(updated)
    }
}

impl<R: Repository<Router>> CommandHandler<AddNetworkToSwitch> for NetworkManagement<R> {
    type Output = Switch;

    fn handle(&self, _principal: &Principal, command: AddNetworkToSwitch) -> DomainResult<Switch> {
        command.validate()?;

        let network = Network::new(Ip::new(command.address)?, command.name, command.cidr)?;
        self.update_switch(command.switch_id, |switch| switch.add_network(network))
    }
}

impl<R: Repository<Router>> CommandHandler<RemoveNetworkFromSwitch> for NetworkManagement<R> {
    type Output = Switch;

    fn handle(&self, _principal: &Principal, command: RemoveNetworkFromSwitch) -> DomainResult<Switch> {
        command.validate()?;

        let name = command.network_name;
        self.update_switch(command.switch_id, |switch| switch.remove_network(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use blueprint_core::InMemoryRepository;
    use blueprint_events::{execute, query};

    use crate::router::fixtures::location;
    use crate::router::{Model, RouterType, Vendor};
    use crate::switch::SwitchType;

    type Routers = Arc<InMemoryRepository<Router>>;

    fn anyone() -> Principal {
        Principal::anonymous()
    }

    fn create(routers: &Routers, router_type: RouterType, ip: &str, country: &str) -> Router {
        execute(
            &RouterManagement::new(routers.clone()),
            &anyone(),
            CreateRouter {
                vendor: Vendor::Cisco,
                model: Model::Xyz0001,
                ip: ip.into(),
                location: location(country),
                router_type,
            },
        )
        .unwrap()
    }

    fn create_switch(routers: &Routers, edge: RouterId) -> DomainResult<Router> {
        execute(
            &SwitchManagement::new(routers.clone()),
            &anyone(),
            CreateSwitch {
                edge_router_id: edge,
                vendor: Vendor::Hp,
                model: Model::Xyz0004,
                ip: "40.0.0.1".into(),
                location: location("United States"),
                switch_type: SwitchType::Layer2,
            },
        )
    }

    fn switch_ids(router: &Router) -> Vec<SwitchId> {
        match router.kind() {
            crate::router::RouterKind::Edge { switches } => switches.keys().copied().collect(),
            crate::router::RouterKind::Core { .. } => Vec::new(),
        }
    }

    #[test]
    fn list_filters_by_type() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        create(&routers, RouterType::Core, "10.0.0.1", "United States");
        create(&routers, RouterType::Edge, "10.0.0.2", "United States");
        create(&routers, RouterType::Edge, "10.0.0.3", "Brazil");

        let mgmt = RouterManagement::new(routers);
        assert_eq!(query(&mgmt, &anyone(), ListRouters::default()).unwrap().len(), 3);
        let edges = query(
            &mgmt,
            &anyone(),
            ListRouters {
                router_type: Some(RouterType::Edge),
            },
        )
        .unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn attach_then_remove_router_detaches_from_core() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        let core = create(&routers, RouterType::Core, "10.0.0.1", "United States");
        let edge = create(&routers, RouterType::Edge, "10.0.0.2", "United States");
        let mgmt = RouterManagement::new(routers.clone());

        let updated = execute(
            &mgmt,
            &anyone(),
            AddRouterToCoreRouter {
                router_id: *edge.id(),
                core_router_id: *core.id(),
            },
        )
        .unwrap();
        assert!(!updated.is_empty());

        execute(&mgmt, &anyone(), RemoveRouter { id: *edge.id() }).unwrap();

        let core = query(&mgmt, &anyone(), RetrieveRouter { id: *core.id() }).unwrap();
        assert!(core.is_empty());
        let err = query(&mgmt, &anyone(), RetrieveRouter { id: *edge.id() }).unwrap_err();
        assert_eq!(err, DomainError::not_found("Router", edge.id()));
    }

    fn attach(mgmt: &RouterManagement<Routers>, router: &Router, core: &Router) -> DomainResult<Router> {
        execute(
            mgmt,
            &anyone(),
            AddRouterToCoreRouter {
                router_id: *router.id(),
                core_router_id: *core.id(),
            },
        )
    }

    #[test]
    fn router_keeps_its_first_parent_and_removal_leaves_no_dangling_child() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        let a = create(&routers, RouterType::Core, "10.0.0.1", "United States");
        let b = create(&routers, RouterType::Core, "10.0.0.2", "United States");
        let edge = create(&routers, RouterType::Edge, "10.0.0.3", "United States");
        let mgmt = RouterManagement::new(routers.clone());

        attach(&mgmt, &edge, &a).unwrap();
        let err = attach(&mgmt, &edge, &b).unwrap_err();
        assert_eq!(err.code(), "invariant_violation");

        execute(&mgmt, &anyone(), RemoveRouter { id: *edge.id() }).unwrap();
        for core in [&a, &b] {
            let core = query(&mgmt, &anyone(), RetrieveRouter { id: *core.id() }).unwrap();
            assert!(core.is_empty());
        }
    }

    #[test]
    fn core_cycles_are_rejected() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        let a = create(&routers, RouterType::Core, "10.0.0.1", "United States");
        let b = create(&routers, RouterType::Core, "10.0.0.2", "United States");
        let c = create(&routers, RouterType::Core, "10.0.0.3", "United States");
        let mgmt = RouterManagement::new(routers.clone());

        attach(&mgmt, &b, &a).unwrap();
        attach(&mgmt, &c, &b).unwrap();

        assert_eq!(attach(&mgmt, &a, &b).unwrap_err().code(), "invariant_violation");
        assert_eq!(attach(&mgmt, &a, &c).unwrap_err().code(), "invariant_violation");

        execute(
            &mgmt,
            &anyone(),
            RemoveRouterFromCoreRouter {
                router_id: *c.id(),
                core_router_id: *b.id(),
            },
        )
        .unwrap();
        execute(&mgmt, &anyone(), RemoveRouter { id: *c.id() }).unwrap();
        assert_eq!(routers.len(), 2);
    }

    #[test]
    fn core_with_routers_cannot_be_removed() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        let core = create(&routers, RouterType::Core, "10.0.0.1", "United States");
        let edge = create(&routers, RouterType::Edge, "10.0.0.2", "United States");
        let mgmt = RouterManagement::new(routers.clone());
        execute(
            &mgmt,
            &anyone(),
            AddRouterToCoreRouter {
                router_id: *edge.id(),
                core_router_id: *core.id(),
            },
        )
        .unwrap();

        let err = execute(&mgmt, &anyone(), RemoveRouter { id: *core.id() }).unwrap_err();
        assert_eq!(err.code(), "invariant_violation");
        assert_eq!(routers.len(), 2);
    }

    #[test]
    fn switch_requires_edge_router() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        let core = create(&routers, RouterType::Core, "10.0.0.1", "United States");

        let err = create_switch(&routers, *core.id()).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Please inform the id of an edge router to add a switch")
        );
    }

    #[test]
    fn network_lifecycle_on_a_switch() {
        let routers: Routers = Arc::new(InMemoryRepository::new());
        let edge = create(&routers, RouterType::Edge, "10.0.0.2", "United States");
        let edge = create_switch(&routers, *edge.id()).unwrap();
        let switch_id = switch_ids(&edge)[0];

        let networks = NetworkManagement::new(routers.clone());
        let add = |address: &str, cidr: u8| {
            execute(
                &networks,
                &anyone(),
                AddNetworkToSwitch {
                    switch_id,
                    address: address.into(),
                    name: "lan".into(),
                    cidr,
                },
            )
        };

        assert_eq!(add("50.0.0.0", 4).unwrap_err(), DomainError::validation("CIDR is below 8"));
        assert_eq!(add("50.0.0.0", 8).unwrap().networks().len(), 1);
        assert_eq!(add("50.0.0.0", 16).unwrap_err(), DomainError::invariant("Address already exist"));

        let switches = SwitchManagement::new(routers.clone());
        let err = execute(
            &switches,
            &anyone(),
            RemoveSwitchFromEdgeRouter {
                switch_id,
                edge_router_id: *edge.id(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "invariant_violation");

        let sw = execute(
            &networks,
            &anyone(),
            RemoveNetworkFromSwitch {
                switch_id,
                network_name: "lan".into(),
            },
        )
        .unwrap();
        assert!(sw.networks().is_empty());
        assert_eq!(
            query(&switches, &anyone(), RetrieveSwitch { id: switch_id }).unwrap(),
            sw
        );

        let edge = execute(
            &switches,
            &anyone(),
            RemoveSwitchFromEdgeRouter {
                switch_id,
                edge_router_id: *edge.id(),
            },
        )
        .unwrap();
        assert!(edge.is_empty());
    }
}
