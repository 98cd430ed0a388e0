use chrono::Utc;

use blueprint_auth::{Principal, Role, authorize};
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::{
    Command, CommandHandler, EventBus, IntegrationEnvelope, IntegrationEvent, QueryHandler, publish_or_warn,
};

use crate::commands::{CreateEnrollCourse, CreateStudent, EnrollToCourse};
use crate::enrollment::{CourseEnrollment, CourseEnrollmentId};
use crate::factory::CourseEnrollmentFactory;
use crate::participants::{EnrollCourse, Student};

pub struct EnrollToCourseHandler<R, C, S, B> {
    enrollments: R,
    factory: CourseEnrollmentFactory<C, S>,
    bus: B,
}

impl<R, C, S, B> EnrollToCourseHandler<R, C, S, B> {
    pub fn new(enrollments: R, factory: CourseEnrollmentFactory<C, S>, bus: B) -> Self {
        Self {
            enrollments,
            factory,
            bus,
        }
    }
}

impl<R, C, S, B> CommandHandler<EnrollToCourse> for EnrollToCourseHandler<R, C, S, B>
where
    R: Repository<CourseEnrollment>,
    C: Repository<EnrollCourse>,
    S: Repository<Student>,
    B: EventBus<IntegrationEnvelope>,
{
    type Output = CourseEnrollmentId;

    fn handle(&self, principal: &Principal, command: EnrollToCourse) -> DomainResult<CourseEnrollmentId> {
        authorize(principal, &[Role::Student])?;

        let enrollment = self.factory.create(principal, command)?;

        let (course, student) = (enrollment.course(), enrollment.student().clone());
        let enrollment = self
            .enrollments
            .insert_unless(enrollment, &|e| e.course() == course && e.student() == &student)?
            .ok_or_else(|| DomainError::already_in_state("Course", course, "enrolled"))?;

        publish_or_warn(
            &self.bus,
            "enrollments",
            IntegrationEvent::StudentEnrolled {
                course_id: *enrollment.course().as_uuid(),
                student: enrollment.student().clone(),
                occurred_at: Utc::now(),
            },
        );

        Ok(*enrollment.id())
    }
}

pub struct CreateEnrollCourseHandler<C> {
    courses: C,
}

impl<C> CreateEnrollCourseHandler<C> {
    pub fn new(courses: C) -> Self {
        Self { courses }
    }
}

impl<C> CommandHandler<CreateEnrollCourse> for CreateEnrollCourseHandler<C>
where
    C: Repository<EnrollCourse>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: CreateEnrollCourse) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        if self.courses.exists(&command.course_id)? {
            return Err(DomainError::already_in_state("Enroll Course", command.course_id, "registered"));
        }
        self.courses.save(EnrollCourse::new(command.course_id))?;
        Ok(())
    }
}

pub struct CreateStudentHandler<S> {
    students: S,
}

impl<S> CreateStudentHandler<S> {
    pub fn new(students: S) -> Self {
        Self { students }
    }
}

impl<S> CommandHandler<CreateStudent> for CreateStudentHandler<S>
where
    S: Repository<Student>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: CreateStudent) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        if self.students.exists(&command.username)? {
            return Err(DomainError::already_in_state("Student", &command.username, "registered"));
        }
        self.students.save(Student::new(command.username))?;
        Ok(())
    }
}

/// Enrollments of the calling student, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListMyEnrollments;

pub struct CourseEnrollmentQueryHandler<R> {
    enrollments: R,
}

impl<R> CourseEnrollmentQueryHandler<R> {
    pub fn new(enrollments: R) -> Self {
        Self { enrollments }
    }
}

impl<R> QueryHandler<ListMyEnrollments> for CourseEnrollmentQueryHandler<R>
where
    R: Repository<CourseEnrollment>,
{
    type Output = Vec<CourseEnrollment>;

    fn handle(&self, principal: &Principal, _query: ListMyEnrollments) -> DomainResult<Vec<CourseEnrollment>> {
        authorize(principal, &[Role::Student])?;
        Ok(self
            .enrollments
            .list()?
            .into_iter()
            .filter(|e| e.student() == principal.username())
            .collect())
    }
}
