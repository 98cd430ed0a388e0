use blueprint_auth::Username;
use blueprint_core::{AggregateRoot, SurrogateId};

/// Local representation of a user registered with the TEACHER role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    surrogate_id: Option<SurrogateId>,
    username: Username,
}

impl Teacher {
    pub fn new(username: Username) -> Self {
        Self {
            surrogate_id: None,
            username,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl AggregateRoot for Teacher {
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
