//! Domain error model.

use thiserror::Error;

use crate::validation::FieldViolation;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. The API layer maps
/// each variant to exactly one HTTP status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more command fields failed their constraints.
    #[error("constraint violation: {}", join_violations(.0))]
    ConstraintViolation(Vec<FieldViolation>),

    /// A single value was malformed (e.g. an IP address or CIDR).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The aggregate addressed by the request does not exist.
    #[error("{resource} with id: {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// A referenced aggregate (not the target) could not be resolved.
    #[error("{resource} cannot be found by id = {id}")]
    RelatedResourceUnresolved { resource: &'static str, id: String },

    /// A guarded transition was requested for the state the aggregate is already in.
    #[error("{resource} with id: {id} is already {state}")]
    AlreadyInState {
        resource: &'static str,
        id: String,
        state: &'static str,
    },

    /// A domain invariant refused the mutation.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A uniqueness conflict (e.g. a username that is already taken).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller's role does not allow the operation.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Credentials were missing or wrong.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The repository backend failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unresolved(resource: &'static str, id: impl ToString) -> Self {
        Self::RelatedResourceUnresolved {
            resource,
            id: id.to_string(),
        }
    }

    pub fn already_in_state(resource: &'static str, id: impl ToString, state: &'static str) -> Self {
        Self::AlreadyInState {
            resource,
            id: id.to_string(),
            state,
        }
    }

    /// Stable machine-readable code (used in logs and error responses).
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::Validation(_) => "validation_error",
            Self::InvalidId(_) => "invalid_id",
            Self::NotFound { .. } => "not_found",
            Self::RelatedResourceUnresolved { .. } => "related_resource_unresolved",
            Self::AlreadyInState { .. } => "already_in_state",
            Self::InvariantViolation(_) => "invariant_violation",
            Self::Conflict(_) => "conflict",
            Self::AccessDenied(_) => "access_denied",
            Self::Unauthenticated => "unauthenticated",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Field violations carried by a `ConstraintViolation`, empty otherwise.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::ConstraintViolation(v) => v,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_resource_and_id() {
        let err = DomainError::not_found("Course Proposal", "abc");
        assert_eq!(err.to_string(), "Course Proposal with id: abc not found");
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn constraint_violation_lists_every_field() {
        let err = DomainError::ConstraintViolation(vec![
            FieldViolation::new("name", "must not be blank"),
            FieldViolation::new("rating", "must be between 0 and 5"),
        ]);
        assert_eq!(
            err.to_string(),
            "constraint violation: name: must not be blank, rating: must be between 0 and 5"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn violations_are_empty_for_other_variants() {
        assert!(DomainError::Unauthenticated.violations().is_empty());
    }
}
