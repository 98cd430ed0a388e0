use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use blueprint_auth::Principal;
use blueprint_events::execute;
use blueprint_infra::AppServices;
use blueprint_users::{SignIn, UserRegistration};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}

pub async fn sign_up(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<UserRegistration>, JsonRejection>,
) -> axum::response::Response {
    let registration = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.register_user(), &Principal::anonymous(), registration) {
        Ok(username) => (
            StatusCode::CREATED,
            Json(dto::CreatedUser {
                username: username.as_str().to_string(),
            }),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<SignIn>, JsonRejection>,
) -> axum::response::Response {
    let credentials = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.sign_in(), &Principal::anonymous(), credentials) {
        Ok(signed_in) => (StatusCode::OK, Json(signed_in)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
