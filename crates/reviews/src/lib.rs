//! `blueprint-reviews`: students rate and comment on published courses.

pub mod commands;
pub mod factory;
pub mod handlers;
pub mod participants;
pub mod review;

pub use commands::{CreateReviewableCourse, CreateReviewer, ReviewCourse, UpdateCourseReview};
pub use factory::CourseReviewFactory;
pub use handlers::{
    CourseReviewQueryHandler, CreateReviewableCourseHandler, CreateReviewerHandler, GetCourseReview,
    ListReviewsForCourse, ReviewCourseHandler, UpdateCourseReviewHandler,
};
pub use participants::{ReviewableCourse, ReviewableCourseId, Reviewer};
pub use review::{Comment, CourseReview, CourseReviewId, ReviewRating};
