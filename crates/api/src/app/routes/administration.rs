use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use blueprint_administration::{ApproveCourseProposal, CourseProposalId, DeclineCourseProposal, ListCourseProposals};
use blueprint_events::{execute, query};
use blueprint_infra::AppServices;

use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/course-proposals", get(list_course_proposals))
        .route("/course-proposals/:uuid/approval-status", put(approve_course_proposal))
        .route("/course-proposals/:uuid/decline-status", put(decline_course_proposal))
}

pub async fn list_course_proposals(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match query(&services.course_proposal_queries(), ctx.principal(), ListCourseProposals) {
        Ok(proposals) => Json(proposals).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn approve_course_proposal(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
) -> axum::response::Response {
    let uuid: CourseProposalId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.approve_course_proposal(), ctx.principal(), ApproveCourseProposal { uuid }) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn decline_course_proposal(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(uuid): Path<String>,
) -> axum::response::Response {
    let uuid: CourseProposalId = match dto::parse_id(&uuid) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match execute(&services.decline_course_proposal(), ctx.principal(), DeclineCourseProposal { uuid }) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
