//! Local representations fed by integration events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_auth::Username;
use blueprint_core::{AggregateRoot, SurrogateId, impl_uuid_newtype};

/// Identifier of the published course in the courses module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewableCourseId(Uuid);

impl_uuid_newtype!(ReviewableCourseId, "ReviewableCourseId");

/// A published course that may receive reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewableCourse {
    surrogate_id: Option<SurrogateId>,
    original_course_id: ReviewableCourseId,
}

impl ReviewableCourse {
    pub fn new(original_course_id: ReviewableCourseId) -> Self {
        Self {
            surrogate_id: None,
            original_course_id,
        }
    }
}

impl AggregateRoot for ReviewableCourse {
    type Id = ReviewableCourseId;

    fn id(&self) -> &Self::Id {
        &self.original_course_id
    }

    fn surrogate_id(&self) -> Option<SurrogateId> {
        self.surrogate_id
    }

    fn assign_surrogate_id(&mut self, id: SurrogateId) {
        self.surrogate_id = Some(id);
    }
}

/// A student allowed to write reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    surrogate_id: Option<SurrogateId>,
    username: Username,
}

impl Reviewer {
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

impl AggregateRoot for Reviewer {
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
