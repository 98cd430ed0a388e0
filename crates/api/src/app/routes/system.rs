use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(ctx): Extension<PrincipalContext>) -> impl IntoResponse {
    let principal = ctx.principal();
    Json(serde_json::json!({
        "username": principal.username().as_str(),
        "role": principal.role().map(|r| r.as_str()),
        "expires_at": ctx.expires_at().to_rfc3339(),
    }))
}
