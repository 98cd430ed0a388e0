use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use blueprint_courses::{CourseId, CreateCourse, GetCourse, ListCourses, PublishCourse};
use blueprint_events::{execute, query};
use blueprint_infra::AppServices;

use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:uuid", get(get_course))
        .route("/:uuid/publish-status", put(publish_course))
        .route("/:uuid/reviews", get(super::reviews::list_reviews_for_course))
}

pub async fn create_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    payload: Result<Json<CreateCourse>, JsonRejection>,
) -> axum::response::Response {
    let cmd = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.create_course(), ctx.principal(), cmd) {
        Ok(uuid) => (StatusCode::CREATED, Json(dto::CreatedId { uuid })).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_courses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match query(&services.course_queries(), ctx.principal(), ListCourses) {
        Ok(courses) => Json(courses).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
) -> axum::response::Response {
    let course_id: CourseId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match query(&services.course_queries(), ctx.principal(), GetCourse { course_id }) {
        Ok(course) => Json(course).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn publish_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
) -> axum::response::Response {
    let course_id: CourseId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.publish_course(), ctx.principal(), PublishCourse { course_id }) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
