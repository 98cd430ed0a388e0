use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use blueprint_events::{execute, query};
use blueprint_infra::AppServices;
use blueprint_reviews::{
    CourseReviewId, GetCourseReview, ListReviewsForCourse, ReviewCourse, ReviewableCourseId, UpdateCourseReview,
};

use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(review_course))
        .route("/:uuid", get(get_course_review).put(update_course_review))
}

pub async fn review_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    payload: Result<Json<ReviewCourse>, JsonRejection>,
) -> axum::response::Response {
    let cmd = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.review_course(), ctx.principal(), cmd) {
        Ok(uuid) => (StatusCode::CREATED, Json(dto::CreatedId { uuid })).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_course_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
) -> axum::response::Response {
    let uuid: CourseReviewId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match query(&services.course_review_queries(), ctx.principal(), GetCourseReview { uuid }) {
        Ok(review) => Json(review).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_course_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
    payload: Result<Json<dto::UpdateCourseReviewRequest>, JsonRejection>,
) -> axum::response::Response {
    let uuid: CourseReviewId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match dto::body(payload) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cmd = UpdateCourseReview {
        uuid,
        rating: body.rating,
        comment: body.comment,
    };
    match execute(&services.update_course_review(), ctx.principal(), cmd) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `GET /courses/:uuid/reviews`; an unknown course simply has no reviews.
pub async fn list_reviews_for_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
) -> axum::response::Response {
    let course_id: ReviewableCourseId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match query(&services.course_review_queries(), ctx.principal(), ListReviewsForCourse { course_id }) {
        Ok(reviews) => Json(reviews).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
