//! Exchange capacity and device detail reads. Open to anonymous callers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
};

use blueprint_auth::Principal;
use blueprint_devices::{ExchangeCode, GetBroadbandAccessDeviceDetails, GetCapacityForExchange, Hostname};
use blueprint_events::query;
use blueprint_infra::AppServices;

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/exchange/:code/capacity", get(get_capacity_for_exchange))
        .route("/broadbandaccessdevice/:hostname", get(get_broadband_access_device))
}

pub async fn get_capacity_for_exchange(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let q = GetCapacityForExchange {
        exchange_code: ExchangeCode::new(code),
    };
    match query(&services.device_queries(), &Principal::anonymous(), q) {
        Ok(capacity) => Json(capacity).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_broadband_access_device(
    Extension(services): Extension<Arc<AppServices>>,
    Path(hostname): Path<String>,
) -> axum::response::Response {
    let q = GetBroadbandAccessDeviceDetails {
        hostname: Hostname::new(hostname),
    };
    match query(&services.device_queries(), &Principal::anonymous(), q) {
        Ok(details) => Json(details).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
