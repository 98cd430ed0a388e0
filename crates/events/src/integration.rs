//! Integration events exchanged between modules.
//!
//! Modules never reach into each other's aggregates. Instead each one keeps a local
//! representation (a teacher, a reviewable course, an enrollable course) fed by
//! these facts and keyed by the other module's external identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_auth::{Role, Username};

use crate::{Event, EventEnvelope};

/// What travels on the bus between modules.
pub type IntegrationEnvelope = EventEnvelope<IntegrationEvent>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrationEvent {
    UserRegistered {
        username: Username,
        email: String,
        role: Role,
        occurred_at: DateTime<Utc>,
    },
    CourseCreated {
        course_id: Uuid,
        teacher: Username,
        occurred_at: DateTime<Utc>,
    },
    CourseApproved {
        course_id: Uuid,
        occurred_at: DateTime<Utc>,
    },
    CourseDeclined {
        course_id: Uuid,
        occurred_at: DateTime<Utc>,
    },
    CoursePublished {
        course_id: Uuid,
        occurred_at: DateTime<Utc>,
    },
    StudentEnrolled {
        course_id: Uuid,
        student: Username,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for IntegrationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            IntegrationEvent::UserRegistered { .. } => "users.user.registered",
            IntegrationEvent::CourseCreated { .. } => "courses.course.created",
            IntegrationEvent::CourseApproved { .. } => "administration.course.approved",
            IntegrationEvent::CourseDeclined { .. } => "administration.course.declined",
            IntegrationEvent::CoursePublished { .. } => "courses.course.published",
            IntegrationEvent::StudentEnrolled { .. } => "enrollments.student.enrolled",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            IntegrationEvent::UserRegistered { occurred_at, .. }
            | IntegrationEvent::CourseCreated { occurred_at, .. }
            | IntegrationEvent::CourseApproved { occurred_at, .. }
            | IntegrationEvent::CourseDeclined { occurred_at, .. }
            | IntegrationEvent::CoursePublished { occurred_at, .. }
            | IntegrationEvent::StudentEnrolled { occurred_at, .. } => *occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_discriminator() {
        let course_id = Uuid::now_v7();
        let ev = IntegrationEvent::CoursePublished {
            course_id,
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "course_published");
        assert_eq!(json["course_id"], course_id.to_string());
        assert_eq!(ev.event_type(), "courses.course.published");
    }
}
