use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use blueprint_core::DomainError;

/// Exactly one status per domain error variant.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::ConstraintViolation(_)
        | DomainError::Validation(_)
        | DomainError::InvalidId(_)
        | DomainError::RelatedResourceUnresolved { .. } => StatusCode::BAD_REQUEST,
        DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
        DomainError::AccessDenied(_) => StatusCode::FORBIDDEN,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::AlreadyInState { .. } | DomainError::InvariantViolation(_) | DomainError::Conflict(_) => {
            StatusCode::CONFLICT
        }
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }

    let mut body = json!({
        "error": err.code(),
        "message": err.to_string(),
    });
    if !err.violations().is_empty() {
        body["violations"] = json!(err.violations());
    }
    (status, axum::Json(body)).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
