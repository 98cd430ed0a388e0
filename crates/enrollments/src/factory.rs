use chrono::Utc;

use blueprint_auth::Principal;
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::Command;

use crate::commands::EnrollToCourse;
use crate::enrollment::CourseEnrollment;
use crate::participants::{EnrollCourse, Student};

/// Builds enrollments after validating the command and resolving course and student.
pub struct CourseEnrollmentFactory<C, S> {
    courses: C,
    students: S,
}

impl<C, S> CourseEnrollmentFactory<C, S>
where
    C: Repository<EnrollCourse>,
    S: Repository<Student>,
{
    pub fn new(courses: C, students: S) -> Self {
        Self { courses, students }
    }

    pub fn create(&self, principal: &Principal, command: EnrollToCourse) -> DomainResult<CourseEnrollment> {
        command.validate()?;
        let course_id = command
            .course_id
            .ok_or_else(|| DomainError::validation("course_id must not be null"))?;

        let course = self
            .courses
            .find_by_id(&course_id)?
            .ok_or_else(|| DomainError::unresolved("Course", course_id))?;
        let student = self
            .students
            .find_by_id(principal.username())?
            .ok_or_else(|| DomainError::unresolved("Student", principal.username()))?;

        Ok(CourseEnrollment::new(*course.id(), student.username().clone(), Utc::now()))
    }
}
