use blueprint_auth::Principal;
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::Command;

use crate::commands::ReviewCourse;
use crate::participants::{ReviewableCourse, Reviewer};
use crate::review::{Comment, CourseReview, ReviewRating};

/// Builds reviews after validating the command and resolving course and reviewer.
pub struct CourseReviewFactory<C, R> {
    courses: C,
    reviewers: R,
}

impl<C, R> CourseReviewFactory<C, R>
where
    C: Repository<ReviewableCourse>,
    R: Repository<Reviewer>,
{
    pub fn new(courses: C, reviewers: R) -> Self {
        Self { courses, reviewers }
    }

    pub fn create(&self, principal: &Principal, command: ReviewCourse) -> DomainResult<CourseReview> {
        command.validate()?;

        let (Some(course_id), Some(rating)) = (command.course_id, command.rating) else {
            return Err(DomainError::validation("course_id and rating are required"));
        };

        let course = self
            .courses
            .find_by_id(&course_id)?
            .ok_or_else(|| DomainError::unresolved("Course", course_id))?;
        let reviewer = self
            .reviewers
            .find_by_id(principal.username())?
            .ok_or_else(|| DomainError::unresolved("Reviewer", principal.username()))?;

        Ok(CourseReview::new(
            *course.id(),
            reviewer.username().clone(),
            ReviewRating::new(rating)?,
            Comment::new(command.comment),
        ))
    }
}
