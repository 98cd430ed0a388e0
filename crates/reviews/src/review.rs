use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_auth::Username;
use blueprint_core::{AggregateRoot, DomainError, DomainResult, SurrogateId, ValueObject, impl_uuid_newtype};

use crate::participants::ReviewableCourseId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseReviewId(Uuid);

impl_uuid_newtype!(CourseReviewId, "CourseReviewId");

/// Rating in `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewRating(f64);

impl ReviewRating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(rating: f64) -> DomainResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&rating) {
            return Err(DomainError::validation(format!(
                "rating must be between {} and {}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(rating))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for ReviewRating {}

/// Free-text comment; an absent comment is stored as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: Option<String>) -> Self {
        Self(text.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Comment {}

/// Aggregate root: CourseReview.
///
/// # Invariants
/// - A review always references a resolved course and reviewer.
/// - Only rating and comment change after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseReview {
    #[serde(skip)]
    surrogate_id: Option<SurrogateId>,
    uuid: CourseReviewId,
    course: ReviewableCourseId,
    reviewer: Username,
    rating: ReviewRating,
    comment: Comment,
}

impl CourseReview {
    pub fn new(course: ReviewableCourseId, reviewer: Username, rating: ReviewRating, comment: Comment) -> Self {
        Self {
            surrogate_id: None,
            uuid: CourseReviewId::new(),
            course,
            reviewer,
            rating,
            comment,
        }
    }

    pub fn course(&self) -> ReviewableCourseId {
        self.course
    }

    pub fn reviewer(&self) -> &Username {
        &self.reviewer
    }

    pub fn rating(&self) -> ReviewRating {
        self.rating
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    pub fn is_written_by(&self, username: &Username) -> bool {
        &self.reviewer == username
    }

    pub fn update(&mut self, rating: ReviewRating, comment: Comment) {
        self.rating = rating;
        self.comment = comment;
    }
}

impl AggregateRoot for CourseReview {
    type Id = CourseReviewId;

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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn update_replaces_rating_and_comment_only() {
        let course = ReviewableCourseId::new();
        let mut review = CourseReview::new(
            course,
            Username::new("alice"),
            ReviewRating::new(3.0).unwrap(),
            Comment::new(None),
        );
        let id = *review.id();

        review.update(ReviewRating::new(5.0).unwrap(), Comment::new(Some("great".into())));

        assert_eq!(*review.id(), id);
        assert_eq!(review.course(), course);
        assert_eq!(review.rating().value(), 5.0);
        assert_eq!(review.comment().as_str(), "great");
        assert!(review.is_written_by(&Username::new("alice")));
    }

    proptest! {
        #[test]
        fn rating_bounds(r in -5.0f64..10.0) {
            prop_assert_eq!(ReviewRating::new(r).is_ok(), (0.0..=5.0).contains(&r));
        }
    }
}
