use serde::Deserialize;

use blueprint_auth::Username;
use blueprint_core::{DomainResult, Violations};
use blueprint_events::Command;

use crate::participants::ReviewableCourseId;
use crate::review::{CourseReviewId, ReviewRating};

fn check_rating(v: &mut Violations, rating: Option<f64>) {
    v.required("rating", &rating);
    if let Some(rating) = rating {
        v.range("rating", rating, ReviewRating::MIN, ReviewRating::MAX);
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewCourse {
    pub course_id: Option<ReviewableCourseId>,
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

impl Command for ReviewCourse {
    fn command_type(&self) -> &'static str {
        "reviews.review_course"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.required("course_id", &self.course_id);
        check_rating(&mut v, self.rating);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCourseReview {
    pub uuid: CourseReviewId,
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

impl Command for UpdateCourseReview {
    fn command_type(&self) -> &'static str {
        "reviews.update_course_review"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        check_rating(&mut v, self.rating);
        v.finish()
    }
}

/// Issued when a course is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateReviewableCourse {
    pub course_id: ReviewableCourseId,
}

impl Command for CreateReviewableCourse {
    fn command_type(&self) -> &'static str {
        "reviews.create_reviewable_course"
    }
}

/// Issued when a student registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewer {
    pub username: Username,
}

impl Command for CreateReviewer {
    fn command_type(&self) -> &'static str {
        "reviews.create_reviewer"
    }
}
