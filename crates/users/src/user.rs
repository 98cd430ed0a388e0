//! User aggregate.

use serde::{Deserialize, Serialize};

use blueprint_auth::{Principal, Role, Username};
use blueprint_core::{AggregateRoot, SurrogateId};

use crate::password::PasswordHash;

/// A registered account.
///
/// # Invariants
/// - The username is unique and immutable.
/// - The role is fixed at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    surrogate_id: Option<SurrogateId>,
    pub username: Username,
    pub email: String,
    pub role: Role,
    password: PasswordHash,
}

impl User {
    pub fn register(username: Username, email: String, role: Role, password: &str) -> Self {
        Self {
            surrogate_id: None,
            username,
            email,
            role,
            password: PasswordHash::new(password),
        }
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password.verify(password)
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.username.clone(), self.role)
    }
}

impl AggregateRoot for User {
    type Id = Username;

    fn id(&self) -> &Self::Id {
        &self.username
    }

    fn surrogate_id(&self) -> Option<SurrogateId> {
        self.surrogate_id
    }

    fn assign_surrogate_id(&mut self, id: SurrogateId) {
        self.surrogate_id = Some(id);
    }
}
