//! Router, switch and network topology endpoints. Open to anonymous callers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use blueprint_auth::Principal;
use blueprint_events::{execute, query};
use blueprint_infra::AppServices;
use blueprint_network::{
    AddNetworkToSwitch, AddRouterToCoreRouter, ChangeLocation, CreateRouter, CreateSwitch, ListRouters, Location,
    RemoveNetworkFromSwitch, RemoveRouter, RemoveRouterFromCoreRouter, RemoveSwitchFromEdgeRouter, RetrieveRouter,
    RetrieveSwitch, RouterId, SwitchId,
};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/router", get(list_routers).post(create_router))
        .route("/router/:id", get(retrieve_router).delete(remove_router))
        .route("/router/:id/to/:core_router_id", post(add_router_to_core_router))
        .route("/router/:id/from/:core_router_id", delete(remove_router_from_core_router))
        .route("/router/changeLocation/:id", post(change_location))
        .route("/switch/:id", get(retrieve_switch))
        .route("/switch/create/:edge_router_id", post(create_switch))
        .route("/switch/:id/from/:edge_router_id", delete(remove_switch_from_edge_router))
        .route("/network/add/:switch_id", post(add_network_to_switch))
        .route("/network/:network_name/from/:switch_id", delete(remove_network_from_switch))
}

fn respond<T: serde::Serialize>(status: StatusCode, result: blueprint_core::DomainResult<T>) -> axum::response::Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

// -------------------------
// Routers
// -------------------------

pub async fn list_routers(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListRoutersParams>,
) -> axum::response::Response {
    let list = ListRouters {
        router_type: params.router_type,
    };
    respond(StatusCode::OK, query(&services.router_management(), &Principal::anonymous(), list))
}

pub async fn create_router(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<CreateRouter>, JsonRejection>,
) -> axum::response::Response {
    let cmd = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(
        StatusCode::CREATED,
        execute(&services.router_management(), &Principal::anonymous(), cmd),
    )
}

pub async fn retrieve_router(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RouterId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(
        StatusCode::OK,
        query(&services.router_management(), &Principal::anonymous(), RetrieveRouter { id }),
    )
}

pub async fn remove_router(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RouterId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match execute(&services.router_management(), &Principal::anonymous(), RemoveRouter { id }) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn router_pair(router_id: &str, core_router_id: &str) -> Result<(RouterId, RouterId), axum::response::Response> {
    Ok((dto::parse_id(router_id)?, dto::parse_id(core_router_id)?))
}

pub async fn add_router_to_core_router(
    Extension(services): Extension<Arc<AppServices>>,
    Path((router_id, core_router_id)): Path<(String, String)>,
) -> axum::response::Response {
    let (router_id, core_router_id) = match router_pair(&router_id, &core_router_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let cmd = AddRouterToCoreRouter {
        router_id,
        core_router_id,
    };
    respond(StatusCode::OK, execute(&services.router_management(), &Principal::anonymous(), cmd))
}

pub async fn remove_router_from_core_router(
    Extension(services): Extension<Arc<AppServices>>,
    Path((router_id, core_router_id)): Path<(String, String)>,
) -> axum::response::Response {
    let (router_id, core_router_id) = match router_pair(&router_id, &core_router_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let cmd = RemoveRouterFromCoreRouter {
        router_id,
        core_router_id,
    };
    respond(StatusCode::OK, execute(&services.router_management(), &Principal::anonymous(), cmd))
}

pub async fn change_location(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<Location>, JsonRejection>,
) -> axum::response::Response {
    let router_id: RouterId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let location = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(
        StatusCode::OK,
        execute(
            &services.router_management(),
            &Principal::anonymous(),
            ChangeLocation { router_id, location },
        ),
    )
}

// -------------------------
// Switches
// -------------------------

pub async fn retrieve_switch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SwitchId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(
        StatusCode::OK,
        query(&services.switch_management(), &Principal::anonymous(), RetrieveSwitch { id }),
    )
}

pub async fn create_switch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(edge_router_id): Path<String>,
    payload: Result<Json<dto::CreateSwitchRequest>, JsonRejection>,
) -> axum::response::Response {
    let edge_router_id: RouterId = match dto::parse_id(&edge_router_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cmd = CreateSwitch {
        edge_router_id,
        vendor: body.vendor,
        model: body.model,
        ip: body.ip,
        location: body.location,
        switch_type: body.switch_type,
    };
    respond(
        StatusCode::CREATED,
        execute(&services.switch_management(), &Principal::anonymous(), cmd),
    )
}

pub async fn remove_switch_from_edge_router(
    Extension(services): Extension<Arc<AppServices>>,
    Path((switch_id, edge_router_id)): Path<(String, String)>,
) -> axum::response::Response {
    let switch_id: SwitchId = match dto::parse_id(&switch_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let edge_router_id: RouterId = match dto::parse_id(&edge_router_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cmd = RemoveSwitchFromEdgeRouter {
        switch_id,
        edge_router_id,
    };
    respond(StatusCode::OK, execute(&services.switch_management(), &Principal::anonymous(), cmd))
}

// -------------------------
// Networks
// -------------------------

pub async fn add_network_to_switch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(switch_id): Path<String>,
    payload: Result<Json<dto::AddNetworkRequest>, JsonRejection>,
) -> axum::response::Response {
    let switch_id: SwitchId = match dto::parse_id(&switch_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cmd = AddNetworkToSwitch {
        switch_id,
        address: body.address,
        name: body.name,
        cidr: body.cidr,
    };
    respond(StatusCode::OK, execute(&services.network_management(), &Principal::anonymous(), cmd))
}

pub async fn remove_network_from_switch(
    Extension(services): Extension<Arc<AppServices>>,
    Path((network_name, switch_id)): Path<(String, String)>,
) -> axum::response::Response {
    let switch_id: SwitchId = match dto::parse_id(&switch_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cmd = RemoveNetworkFromSwitch {
        switch_id,
        network_name,
    };
    respond(StatusCode::OK, execute(&services.network_management(), &Principal::anonymous(), cmd))
}
