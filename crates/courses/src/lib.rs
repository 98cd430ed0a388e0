//! `blueprint-courses`: course authoring and publication.
//!
//! Teachers create courses with a curriculum and publish them. Approval decisions
//! arrive from administration and enrollment counts from enrollments, both as
//! integration events.

pub mod commands;
pub mod course;
pub mod factory;
pub mod handlers;
pub mod queries;
pub mod teacher;

pub use commands::{
    ApplyApprovalDecision, CreateCourse, CreateCurriculumItem, CreateCurriculumItemKind, IncreaseNumberOfStudents,
    PublishCourse, RegisterTeacher,
};
pub use course::{
    ApprovalDecision, ApprovalStatus, Course, CourseId, CourseRating, CurriculumItem, CurriculumItemKind,
    NumberOfStudents, PublishStatus, Question,
};
pub use factory::CourseFactory;
pub use handlers::{
    ApplyApprovalDecisionHandler, CreateCourseHandler, IncreaseNumberOfStudentsHandler, PublishCourseHandler,
    RegisterTeacherHandler,
};
pub use queries::{CourseDetail, CourseQueryHandler, CourseSummary, GetCourse, ListCourses};
pub use teacher::Teacher;
