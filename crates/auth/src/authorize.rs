use thiserror::Error;
use tracing::debug;

use blueprint_core::DomainError;

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("role {} is not allowed; requires one of {}", format_actual(.actual), format_roles(.required))]
    AccessDenied {
        required: Vec<Role>,
        actual: Option<Role>,
    },
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::access_denied(value.to_string())
    }
}

/// Role predicate evaluated before a handler body runs.
///
/// - No IO
/// - No panics
/// - No business logic (ownership checks stay in the handler)
pub fn authorize(principal: &Principal, allowed: &[Role]) -> Result<(), AuthzError> {
    if principal.role().is_some_and(|role| allowed.contains(&role)) {
        return Ok(());
    }

    debug!(
        username = %principal.username(),
        role = ?principal.role(),
        "authorization denied"
    );

    Err(AuthzError::AccessDenied {
        required: allowed.to_vec(),
        actual: principal.role(),
    })
}

fn format_actual(actual: &Option<Role>) -> &'static str {
    actual.map_or("anonymous", |r| r.as_str())
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_role_passes() {
        let teacher = Principal::new("mrsmith", Role::Teacher);
        assert!(authorize(&teacher, &[Role::Teacher]).is_ok());
        assert!(authorize(&teacher, &[Role::Admin, Role::Teacher]).is_ok());
    }

    #[test]
    fn other_role_is_denied_with_context() {
        let student = Principal::new("alice", Role::Student);
        let err = authorize(&student, &[Role::Teacher]).unwrap_err();
        assert_eq!(
            err,
            AuthzError::AccessDenied {
                required: vec![Role::Teacher],
                actual: Some(Role::Student)
            }
        );
        assert_eq!(err.to_string(), "role STUDENT is not allowed; requires one of TEACHER");
    }

    #[test]
    fn anonymous_is_never_authorized() {
        let err = authorize(&Principal::anonymous(), &Role::ALL).unwrap_err();
        assert!(err.to_string().starts_with("role anonymous"));
    }

    #[test]
    fn converts_into_access_denied_domain_error() {
        let student = Principal::new("alice", Role::Student);
        let err: DomainError = authorize(&student, &[Role::Admin]).unwrap_err().into();
        assert_eq!(err.code(), "access_denied");
    }
}
