use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_auth::Username;
use blueprint_core::{AggregateRoot, SurrogateId, impl_uuid_newtype};

use crate::participants::EnrollCourseId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseEnrollmentId(Uuid);

impl_uuid_newtype!(CourseEnrollmentId, "CourseEnrollmentId");

/// Aggregate root: CourseEnrollment.
///
/// Immutable once created; a student holds at most one enrollment per course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseEnrollment {
    #[serde(skip)]
    surrogate_id: Option<SurrogateId>,
    uuid: CourseEnrollmentId,
    course: EnrollCourseId,
    student: Username,
    enrolled_at: DateTime<Utc>,
}

impl CourseEnrollment {
    pub fn new(course: EnrollCourseId, student: Username, enrolled_at: DateTime<Utc>) -> Self {
        Self {
            surrogate_id: None,
            uuid: CourseEnrollmentId::new(),
            course,
            student,
            enrolled_at,
        }
    }

    pub fn course(&self) -> EnrollCourseId {
        self.course
    }

    pub fn student(&self) -> &Username {
        &self.student
    }

    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }
}

impl AggregateRoot for CourseEnrollment {
    type Id = CourseEnrollmentId;

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
