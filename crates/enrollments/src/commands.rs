use serde::Deserialize;

use blueprint_auth::Username;
use blueprint_core::{DomainResult, Violations};
use blueprint_events::Command;

use crate::participants::EnrollCourseId;

/// Enroll the calling student to a published course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnrollToCourse {
    pub course_id: Option<EnrollCourseId>,
}

impl Command for EnrollToCourse {
    fn command_type(&self) -> &'static str {
        "enrollments.enroll"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.required("course_id", &self.course_id);
        v.finish()
    }
}

/// Issued when a course is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateEnrollCourse {
    pub course_id: EnrollCourseId,
}

impl Command for CreateEnrollCourse {
    fn command_type(&self) -> &'static str {
        "enrollments.create_enroll_course"
    }
}

/// Issued when a student registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStudent {
    pub username: Username,
}

impl Command for CreateStudent {
    fn command_type(&self) -> &'static str {
        "enrollments.create_student"
    }
}
