//! `blueprint-network`: topology inventory of routers, switches and networks.
//!
//! Domain types (`ip`, `location`, `network`, `switch`, `router`) enforce the
//! topology rules; `management` exposes them as commands and queries.

pub mod commands;
pub mod ip;
pub mod location;
pub mod management;
pub mod network;
pub mod router;
pub mod switch;

pub use commands::{
    AddNetworkToSwitch, AddRouterToCoreRouter, ChangeLocation, CreateRouter, CreateSwitch, ListRouters,
    RemoveNetworkFromSwitch, RemoveRouter, RemoveRouterFromCoreRouter, RemoveSwitchFromEdgeRouter, RetrieveRouter,
    RetrieveSwitch,
};
pub use ip::{Ip, Protocol};
pub use location::Location;
pub use management::{NetworkManagement, RouterManagement, SwitchManagement};
pub use network::{MAXIMUM_ALLOWED_NETWORKS, MINIMUM_ALLOWED_CIDR, Network};
pub use router::{Model, Router, RouterId, RouterKind, RouterType, Vendor};
pub use switch::{Switch, SwitchId, SwitchType};
