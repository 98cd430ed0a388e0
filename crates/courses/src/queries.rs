use serde::Serialize;

use blueprint_auth::{Principal, Role, Username, authorize};
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::QueryHandler;

use crate::course::{ApprovalStatus, Course, CourseId, CurriculumItem, PublishStatus};

#[derive(Debug, Clone, Copy, Default)]
pub struct ListCourses;

#[derive(Debug, Clone, Copy)]
pub struct GetCourse {
    pub course_id: CourseId,
}

/// Light view used by the course list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub uuid: CourseId,
    pub name: String,
    pub description: String,
    pub teacher: Username,
    pub number_of_students: u32,
    pub rating: f64,
    pub approval_status: ApprovalStatus,
    pub publish_status: PublishStatus,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            uuid: *course.id(),
            name: course.name().to_string(),
            description: course.description().to_string(),
            teacher: course.teacher().clone(),
            number_of_students: course.number_of_students().value(),
            rating: course.rating().value(),
            approval_status: course.approval_status(),
            publish_status: course.publish_status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub summary: CourseSummary,
    pub curriculum: Vec<CurriculumItem>,
}

/// Read side of the course module; any authenticated role may read.
pub struct CourseQueryHandler<R> {
    courses: R,
}

impl<R> CourseQueryHandler<R> {
    pub fn new(courses: R) -> Self {
        Self { courses }
    }
}

impl<R> QueryHandler<ListCourses> for CourseQueryHandler<R>
where
    R: Repository<Course>,
{
    type Output = Vec<CourseSummary>;

    fn handle(&self, principal: &Principal, _query: ListCourses) -> DomainResult<Vec<CourseSummary>> {
        authorize(principal, &Role::ALL)?;
        Ok(self.courses.list()?.iter().map(CourseSummary::from).collect())
    }
}

impl<R> QueryHandler<GetCourse> for CourseQueryHandler<R>
where
    R: Repository<Course>,
{
    type Output = CourseDetail;

    fn handle(&self, principal: &Principal, query: GetCourse) -> DomainResult<CourseDetail> {
        authorize(principal, &Role::ALL)?;
        let course = self
            .courses
            .find_by_id(&query.course_id)?
            .ok_or_else(|| DomainError::not_found("Course", query.course_id))?;

        Ok(CourseDetail {
            summary: CourseSummary::from(&course),
            curriculum: course.curriculum().to_vec(),
        })
    }
}
