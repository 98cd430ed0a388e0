use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use blueprint_enrollments::{EnrollToCourse, ListMyEnrollments};
use blueprint_events::{execute, query};
use blueprint_infra::AppServices;

use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_my_enrollments).post(enroll_to_course))
}

pub async fn enroll_to_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    payload: Result<Json<EnrollToCourse>, JsonRejection>,
) -> axum::response::Response {
    let cmd = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.enroll_to_course(), ctx.principal(), cmd) {
        Ok(uuid) => (StatusCode::CREATED, Json(dto::CreatedId { uuid })).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_my_enrollments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match query(&services.course_enrollment_queries(), ctx.principal(), ListMyEnrollments) {
        Ok(enrollments) => Json(enrollments).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
