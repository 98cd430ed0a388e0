//! Composition root: every repository, the integration bus and the handlers
//! built over them.
//!
//! Handlers are small generic structs over `Arc` repositories; accessors build
//! one per call.

use std::sync::Arc;

use blueprint_auth::Hs256JwtValidator;
use blueprint_core::InMemoryRepository;
use blueprint_events::{InMemoryEventBus, IntegrationEnvelope};

use blueprint_administration::{
    ApproveCourseProposalHandler, CourseProposal, CourseProposalQueryHandler, CreateCourseProposalHandler,
    DeclineCourseProposalHandler,
};
use blueprint_courses::{
    ApplyApprovalDecisionHandler, Course, CourseFactory, CourseQueryHandler, CreateCourseHandler,
    IncreaseNumberOfStudentsHandler, PublishCourseHandler, RegisterTeacherHandler, Teacher,
};
use blueprint_devices::{
    BroadbandAccessDevice, DeviceClient, DeviceQueryHandler, Exchange, NetworkSerialNumberSource,
    ReconcileBroadbandAccessDevices,
};
use blueprint_enrollments::{
    CourseEnrollment, CourseEnrollmentFactory, CourseEnrollmentQueryHandler, CreateEnrollCourseHandler,
    CreateStudentHandler, EnrollCourse, EnrollToCourseHandler, Student,
};
use blueprint_network::{NetworkManagement, Router, RouterManagement, SwitchManagement};
use blueprint_reviews::{
    CourseReview, CourseReviewFactory, CourseReviewQueryHandler, CreateReviewableCourseHandler,
    CreateReviewerHandler, ReviewCourseHandler, ReviewableCourse, Reviewer, UpdateCourseReviewHandler,
};
use blueprint_users::{RegisterUserHandler, SignInHandler, User};

use crate::config::AppConfig;

pub type Repo<A> = Arc<InMemoryRepository<A>>;
pub type Bus = Arc<InMemoryEventBus<IntegrationEnvelope>>;
pub type SerialNumbers = NetworkSerialNumberSource<Arc<dyn DeviceClient>>;

fn repo<A: blueprint_core::AggregateRoot>() -> Repo<A> {
    Arc::new(InMemoryRepository::new())
}

pub struct AppServices {
    pub bus: Bus,
    pub jwt: Arc<Hs256JwtValidator>,
    pub token_ttl: chrono::Duration,
    pub device_client: Arc<dyn DeviceClient>,

    pub users: Repo<User>,

    pub courses: Repo<Course>,
    pub teachers: Repo<Teacher>,

    pub proposals: Repo<CourseProposal>,

    pub reviews: Repo<CourseReview>,
    pub reviewable_courses: Repo<ReviewableCourse>,
    pub reviewers: Repo<Reviewer>,

    pub enrollments: Repo<CourseEnrollment>,
    pub enroll_courses: Repo<EnrollCourse>,
    pub students: Repo<Student>,

    pub routers: Repo<Router>,

    pub exchanges: Repo<Exchange>,
    pub devices: Repo<BroadbandAccessDevice>,
}

impl AppServices {
    pub fn new(config: &AppConfig, device_client: Arc<dyn DeviceClient>) -> Self {
        Self {
            bus: Arc::new(InMemoryEventBus::new()),
            jwt: Arc::new(Hs256JwtValidator::new(config.jwt_secret.as_bytes())),
            token_ttl: config.jwt_ttl,
            device_client,
            users: repo(),
            courses: repo(),
            teachers: repo(),
            proposals: repo(),
            reviews: repo(),
            reviewable_courses: repo(),
            reviewers: repo(),
            enrollments: repo(),
            enroll_courses: repo(),
            students: repo(),
            routers: repo(),
            exchanges: repo(),
            devices: repo(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub fn register_user(&self) -> RegisterUserHandler<Repo<User>, Bus> {
        RegisterUserHandler::new(self.users.clone(), self.bus.clone())
    }

    pub fn sign_in(&self) -> SignInHandler<Repo<User>> {
        SignInHandler::new(self.users.clone(), self.jwt.clone(), self.token_ttl)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Courses
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_course(&self) -> CreateCourseHandler<Repo<Course>, Repo<Teacher>, Bus> {
        CreateCourseHandler::new(
            self.courses.clone(),
            CourseFactory::new(self.teachers.clone()),
            self.bus.clone(),
        )
    }

    pub fn publish_course(&self) -> PublishCourseHandler<Repo<Course>, Bus> {
        PublishCourseHandler::new(self.courses.clone(), self.bus.clone())
    }

    pub fn increase_number_of_students(&self) -> IncreaseNumberOfStudentsHandler<Repo<Course>> {
        IncreaseNumberOfStudentsHandler::new(self.courses.clone())
    }

    pub fn apply_approval_decision(&self) -> ApplyApprovalDecisionHandler<Repo<Course>> {
        ApplyApprovalDecisionHandler::new(self.courses.clone())
    }

    pub fn register_teacher(&self) -> RegisterTeacherHandler<Repo<Teacher>> {
        RegisterTeacherHandler::new(self.teachers.clone())
    }

    pub fn course_queries(&self) -> CourseQueryHandler<Repo<Course>> {
        CourseQueryHandler::new(self.courses.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_course_proposal(&self) -> CreateCourseProposalHandler<Repo<CourseProposal>> {
        CreateCourseProposalHandler::new(self.proposals.clone())
    }

    pub fn approve_course_proposal(&self) -> ApproveCourseProposalHandler<Repo<CourseProposal>, Bus> {
        ApproveCourseProposalHandler::new(self.proposals.clone(), self.bus.clone())
    }

    pub fn decline_course_proposal(&self) -> DeclineCourseProposalHandler<Repo<CourseProposal>, Bus> {
        DeclineCourseProposalHandler::new(self.proposals.clone(), self.bus.clone())
    }

    pub fn course_proposal_queries(&self) -> CourseProposalQueryHandler<Repo<CourseProposal>> {
        CourseProposalQueryHandler::new(self.proposals.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reviews
    // ─────────────────────────────────────────────────────────────────────────

    pub fn review_course(&self) -> ReviewCourseHandler<Repo<CourseReview>, Repo<ReviewableCourse>, Repo<Reviewer>> {
        ReviewCourseHandler::new(
            self.reviews.clone(),
            CourseReviewFactory::new(self.reviewable_courses.clone(), self.reviewers.clone()),
        )
    }

    pub fn update_course_review(&self) -> UpdateCourseReviewHandler<Repo<CourseReview>> {
        UpdateCourseReviewHandler::new(self.reviews.clone())
    }

    pub fn create_reviewable_course(&self) -> CreateReviewableCourseHandler<Repo<ReviewableCourse>> {
        CreateReviewableCourseHandler::new(self.reviewable_courses.clone())
    }

    pub fn create_reviewer(&self) -> CreateReviewerHandler<Repo<Reviewer>> {
        CreateReviewerHandler::new(self.reviewers.clone())
    }

    pub fn course_review_queries(&self) -> CourseReviewQueryHandler<Repo<CourseReview>> {
        CourseReviewQueryHandler::new(self.reviews.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enrollments
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enroll_to_course(
        &self,
    ) -> EnrollToCourseHandler<Repo<CourseEnrollment>, Repo<EnrollCourse>, Repo<Student>, Bus> {
        EnrollToCourseHandler::new(
            self.enrollments.clone(),
            CourseEnrollmentFactory::new(self.enroll_courses.clone(), self.students.clone()),
            self.bus.clone(),
        )
    }

    pub fn create_enroll_course(&self) -> CreateEnrollCourseHandler<Repo<EnrollCourse>> {
        CreateEnrollCourseHandler::new(self.enroll_courses.clone())
    }

    pub fn create_student(&self) -> CreateStudentHandler<Repo<Student>> {
        CreateStudentHandler::new(self.students.clone())
    }

    pub fn course_enrollment_queries(&self) -> CourseEnrollmentQueryHandler<Repo<CourseEnrollment>> {
        CourseEnrollmentQueryHandler::new(self.enrollments.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Network topology
    // ─────────────────────────────────────────────────────────────────────────

    pub fn router_management(&self) -> RouterManagement<Repo<Router>> {
        RouterManagement::new(self.routers.clone())
    }

    pub fn switch_management(&self) -> SwitchManagement<Repo<Router>> {
        SwitchManagement::new(self.routers.clone())
    }

    pub fn network_management(&self) -> NetworkManagement<Repo<Router>> {
        NetworkManagement::new(self.routers.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Devices
    // ─────────────────────────────────────────────────────────────────────────

    pub fn device_queries(&self) -> DeviceQueryHandler<Repo<Exchange>, Repo<BroadbandAccessDevice>> {
        DeviceQueryHandler::new(self.exchanges.clone(), self.devices.clone())
    }

    pub fn reconcile_devices(&self) -> ReconcileBroadbandAccessDevices<Repo<BroadbandAccessDevice>, SerialNumbers> {
        ReconcileBroadbandAccessDevices::new(
            self.devices.clone(),
            NetworkSerialNumberSource::new(self.device_client.clone()),
        )
    }
}
