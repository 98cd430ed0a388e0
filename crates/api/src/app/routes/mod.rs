use axum::{Router, routing::get};

pub mod administration;
pub mod courses;
pub mod devices;
pub mod enrollments;
pub mod network;
pub mod reviews;
pub mod system;
pub mod users;

/// Endpoints open to anonymous callers.
pub fn public_router() -> Router {
    Router::new()
        .nest("/users", users::router())
        .merge(network::router())
        .merge(devices::router())
}

/// Endpoints behind the bearer-token middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/courses", courses::router())
        .nest("/administration", administration::router())
        .nest("/course-reviews", reviews::router())
        .nest("/course-enrollments", enrollments::router())
}
