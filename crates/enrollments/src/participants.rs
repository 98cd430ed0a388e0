//! Courses and students as seen by the enrollments module.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_auth::Username;
use blueprint_core::{AggregateRoot, SurrogateId, impl_uuid_newtype};

/// Identifier of the published course in the courses module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollCourseId(Uuid);

impl_uuid_newtype!(EnrollCourseId, "EnrollCourseId");

/// A published course open for enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollCourse {
    surrogate_id: Option<SurrogateId>,
    uuid: EnrollCourseId,
}

impl EnrollCourse {
    pub fn new(uuid: EnrollCourseId) -> Self {
        Self {
            surrogate_id: None,
            uuid,
        }
    }
}

impl AggregateRoot for EnrollCourse {
    type Id = EnrollCourseId;

    fn id(&self) -> &Self::Id {
        &self.uuid
    }

    fn surrogate_id(&self) -> Option<SurrogateId> {
        self.surrogate_id
    }

    fn assign_surrogate_id(&mut self, id: SurrogateId) {
        self.surrogate_id = Some(id);
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    surrogate_id: Option<SurrogateId>,
    username: Username,
}

impl Student {
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

impl AggregateRoot for Student {
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
