use serde::{Deserialize, Serialize};

use crate::Role;

/// Login name; the stable external identifier of a user.
///
/// Teachers, students and reviewers are referenced across modules by username only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Username {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The caller of a handler.
///
/// Authenticated callers are derived from verified token claims and always carry a
/// role. Sign-up and sign-in run as [`Principal::anonymous`], which no role
/// predicate accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: Username,
    role: Option<Role>,
}

impl Principal {
    pub fn new(username: impl Into<Username>, role: Role) -> Self {
        Self {
            username: username.into(),
            role: Some(role),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            username: Username::new("anonymous"),
            role: None,
        }
    }

    /// Internal principal used when a module reacts to an integration event.
    pub fn system() -> Self {
        Self::new(Username::new("system"), Role::Admin)
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}
