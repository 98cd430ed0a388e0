use blueprint_auth::{Principal, Role, authorize};
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::{Command, CommandHandler, QueryHandler};

use crate::commands::{CreateReviewableCourse, CreateReviewer, ReviewCourse, UpdateCourseReview};
use crate::factory::CourseReviewFactory;
use crate::participants::{ReviewableCourse, ReviewableCourseId, Reviewer};
use crate::review::{Comment, CourseReview, CourseReviewId, ReviewRating};

pub struct ReviewCourseHandler<R, C, V> {
    reviews: R,
    factory: CourseReviewFactory<C, V>,
}

impl<R, C, V> ReviewCourseHandler<R, C, V> {
    pub fn new(reviews: R, factory: CourseReviewFactory<C, V>) -> Self {
        Self { reviews, factory }
    }
}

impl<R, C, V> CommandHandler<ReviewCourse> for ReviewCourseHandler<R, C, V>
where
    R: Repository<CourseReview>,
    C: Repository<ReviewableCourse>,
    V: Repository<Reviewer>,
{
    type Output = CourseReviewId;

    fn handle(&self, principal: &Principal, command: ReviewCourse) -> DomainResult<CourseReviewId> {
        authorize(principal, &[Role::Student])?;

        let review = self.factory.create(principal, command)?;
        let review = self.reviews.save(review)?;
        Ok(*review.id())
    }
}

pub struct UpdateCourseReviewHandler<R> {
    reviews: R,
}

impl<R> UpdateCourseReviewHandler<R> {
    pub fn new(reviews: R) -> Self {
        Self { reviews }
    }
}

impl<R> CommandHandler<UpdateCourseReview> for UpdateCourseReviewHandler<R>
where
    R: Repository<CourseReview>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: UpdateCourseReview) -> DomainResult<()> {
        authorize(principal, &[Role::Student])?;

        let mut review = self
            .reviews
            .find_by_id(&command.uuid)?
            .ok_or_else(|| DomainError::not_found("Course Review", command.uuid))?;
        if !review.is_written_by(principal.username()) {
            return Err(DomainError::access_denied(format!(
                "course review {} belongs to another reviewer",
                command.uuid
            )));
        }

        command.validate()?;
        let rating = command
            .rating
            .ok_or_else(|| DomainError::validation("rating must not be null"))?;

        review.update(ReviewRating::new(rating)?, Comment::new(command.comment));
        self.reviews.save(review)?;
        Ok(())
    }
}

pub struct CreateReviewableCourseHandler<C> {
    courses: C,
}

impl<C> CreateReviewableCourseHandler<C> {
    pub fn new(courses: C) -> Self {
        Self { courses }
    }
}

impl<C> CommandHandler<CreateReviewableCourse> for CreateReviewableCourseHandler<C>
where
    C: Repository<ReviewableCourse>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: CreateReviewableCourse) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        if self.courses.exists(&command.course_id)? {
            return Err(DomainError::already_in_state("Reviewable Course", command.course_id, "registered"));
        }
        self.courses.save(ReviewableCourse::new(command.course_id))?;
        Ok(())
    }
}

pub struct CreateReviewerHandler<V> {
    reviewers: V,
}

impl<V> CreateReviewerHandler<V> {
    pub fn new(reviewers: V) -> Self {
        Self { reviewers }
    }
}

impl<V> CommandHandler<CreateReviewer> for CreateReviewerHandler<V>
where
    V: Repository<Reviewer>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: CreateReviewer) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        if self.reviewers.exists(&command.username)? {
            return Err(DomainError::already_in_state("Reviewer", &command.username, "registered"));
        }
        self.reviewers.save(Reviewer::new(command.username))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct GetCourseReview {
    pub uuid: CourseReviewId,
}

#[derive(Debug, Clone, Copy)]
pub struct ListReviewsForCourse {
    pub course_id: ReviewableCourseId,
}

pub struct CourseReviewQueryHandler<R> {
    reviews: R,
}

impl<R> CourseReviewQueryHandler<R> {
    pub fn new(reviews: R) -> Self {
        Self { reviews }
    }
}

impl<R> QueryHandler<GetCourseReview> for CourseReviewQueryHandler<R>
where
    R: Repository<CourseReview>,
{
    type Output = CourseReview;

    fn handle(&self, principal: &Principal, query: GetCourseReview) -> DomainResult<CourseReview> {
        authorize(principal, &Role::ALL)?;
        self.reviews
            .find_by_id(&query.uuid)?
            .ok_or_else(|| DomainError::not_found("Course Review", query.uuid))
    }
}

impl<R> QueryHandler<ListReviewsForCourse> for CourseReviewQueryHandler<R>
where
    R: Repository<CourseReview>,
{
    type Output = Vec<CourseReview>;

    fn handle(&self, principal: &Principal, query: ListReviewsForCourse) -> DomainResult<Vec<CourseReview>> {
        authorize(principal, &Role::ALL)?;
        Ok(self
            .reviews
            .list()?
            .into_iter()
            .filter(|review| review.course() == query.course_id)
            .collect())
    }
}
