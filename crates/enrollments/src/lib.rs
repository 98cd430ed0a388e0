//! `blueprint-enrollments`: students enroll to published courses.

pub mod commands;
pub mod enrollment;
pub mod factory;
pub mod handlers;
pub mod participants;

pub use commands::{CreateEnrollCourse, CreateStudent, EnrollToCourse};
pub use enrollment::{CourseEnrollment, CourseEnrollmentId};
pub use factory::CourseEnrollmentFactory;
pub use handlers::{
    CourseEnrollmentQueryHandler, CreateEnrollCourseHandler, CreateStudentHandler, EnrollToCourseHandler,
    ListMyEnrollments,
};
pub use participants::{EnrollCourse, EnrollCourseId, Student};
