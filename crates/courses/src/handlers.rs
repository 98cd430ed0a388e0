use chrono::Utc;

use blueprint_auth::{Principal, Role, authorize};
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::{Command, CommandHandler, EventBus, IntegrationEnvelope, IntegrationEvent, publish_or_warn};

use crate::commands::{ApplyApprovalDecision, CreateCourse, IncreaseNumberOfStudents, PublishCourse, RegisterTeacher};
use crate::course::{Course, CourseId};
use crate::factory::CourseFactory;
use crate::teacher::Teacher;

const SOURCE: &str = "courses";

fn load<R: Repository<Course>>(courses: &R, id: CourseId) -> DomainResult<Course> {
    courses
        .find_by_id(&id)?
        .ok_or_else(|| DomainError::not_found("Course", id))
}

pub struct CreateCourseHandler<R, T, B> {
    courses: R,
    factory: CourseFactory<T>,
    bus: B,
}

impl<R, T, B> CreateCourseHandler<R, T, B> {
    pub fn new(courses: R, factory: CourseFactory<T>, bus: B) -> Self {
        Self { courses, factory, bus }
    }
}

impl<R, T, B> CommandHandler<CreateCourse> for CreateCourseHandler<R, T, B>
where
    R: Repository<Course>,
    T: Repository<Teacher>,
    B: EventBus<IntegrationEnvelope>,
{
    type Output = CourseId;

    fn handle(&self, principal: &Principal, command: CreateCourse) -> DomainResult<CourseId> {
        authorize(principal, &[Role::Teacher])?;

        let course = self.factory.create(principal, command)?;
        let course = self.courses.save(course)?;

        publish_or_warn(
            &self.bus,
            SOURCE,
            IntegrationEvent::CourseCreated {
                course_id: *course.id().as_uuid(),
                teacher: course.teacher().clone(),
                occurred_at: Utc::now(),
            },
        );

        Ok(*course.id())
    }
}

pub struct PublishCourseHandler<R, B> {
    courses: R,
    bus: B,
}

impl<R, B> PublishCourseHandler<R, B> {
    pub fn new(courses: R, bus: B) -> Self {
        Self { courses, bus }
    }
}

impl<R, B> CommandHandler<PublishCourse> for PublishCourseHandler<R, B>
where
    R: Repository<Course>,
    B: EventBus<IntegrationEnvelope>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: PublishCourse) -> DomainResult<()> {
        authorize(principal, &[Role::Teacher])?;
        command.validate()?;

        let mut course = load(&self.courses, command.course_id)?;
        course.publish()?;
        let course = self.courses.save(course)?;

        publish_or_warn(
            &self.bus,
            SOURCE,
            IntegrationEvent::CoursePublished {
                course_id: *course.id().as_uuid(),
                occurred_at: Utc::now(),
            },
        );

        Ok(())
    }
}

pub struct IncreaseNumberOfStudentsHandler<R> {
    courses: R,
}

impl<R> IncreaseNumberOfStudentsHandler<R> {
    pub fn new(courses: R) -> Self {
        Self { courses }
    }
}

impl<R> CommandHandler<IncreaseNumberOfStudents> for IncreaseNumberOfStudentsHandler<R>
where
    R: Repository<Course>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: IncreaseNumberOfStudents) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        let mut course = load(&self.courses, command.course_id)?;
        course.increase_number_of_students();
        self.courses.save(course)?;
        Ok(())
    }
}

pub struct ApplyApprovalDecisionHandler<R> {
    courses: R,
}

impl<R> ApplyApprovalDecisionHandler<R> {
    pub fn new(courses: R) -> Self {
        Self { courses }
    }
}

impl<R> CommandHandler<ApplyApprovalDecision> for ApplyApprovalDecisionHandler<R>
where
    R: Repository<Course>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: ApplyApprovalDecision) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        let mut course = load(&self.courses, command.course_id)?;
        course.apply_approval_decision(command.decision)?;
        self.courses.save(course)?;
        Ok(())
    }
}

pub struct RegisterTeacherHandler<T> {
    teachers: T,
}

impl<T> RegisterTeacherHandler<T> {
    pub fn new(teachers: T) -> Self {
        Self { teachers }
    }
}

impl<T> CommandHandler<RegisterTeacher> for RegisterTeacherHandler<T>
where
    T: Repository<Teacher>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: RegisterTeacher) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        if self.teachers.exists(&command.username)? {
            return Err(DomainError::already_in_state("Teacher", &command.username, "registered"));
        }
        self.teachers.save(Teacher::new(command.username))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use blueprint_auth::Username;
    use blueprint_core::InMemoryRepository;
    use blueprint_events::{InMemoryEventBus, execute};

    use crate::course::{ApprovalDecision, ApprovalStatus, PublishStatus};

    type Courses = Arc<InMemoryRepository<Course>>;
    type Bus = Arc<InMemoryEventBus<IntegrationEnvelope>>;

    struct Fixture {
        courses: Courses,
        bus: Bus,
        create: CreateCourseHandler<Courses, Arc<InMemoryRepository<Teacher>>, Bus>,
        publish: PublishCourseHandler<Courses, Bus>,
    }

    fn fixture() -> Fixture {
        let courses: Courses = Arc::new(InMemoryRepository::new());
        let teachers = Arc::new(InMemoryRepository::<Teacher>::new());
        let bus: Bus = Arc::new(InMemoryEventBus::new());

        RegisterTeacherHandler::new(teachers.clone())
            .handle(
                &Principal::system(),
                RegisterTeacher {
                    username: Username::new("mrsmith"),
                },
            )
            .unwrap();

        Fixture {
            create: CreateCourseHandler::new(courses.clone(), CourseFactory::new(teachers), bus.clone()),
            publish: PublishCourseHandler::new(courses.clone(), bus.clone()),
            courses,
            bus,
        }
    }

    fn teacher() -> Principal {
        Principal::new("mrsmith", Role::Teacher)
    }

    fn cs101() -> CreateCourse {
        CreateCourse {
            name: "CS101".into(),
            description: "Intro".into(),
            curriculum_items: vec![],
        }
    }

    #[test]
    fn create_then_publish_twice() {
        let f = fixture();
        let sub = f.bus.subscribe();

        let id = execute(&f.create, &teacher(), cs101()).unwrap();
        assert!(matches!(
            sub.try_recv().unwrap().payload(),
            IntegrationEvent::CourseCreated { course_id, .. } if course_id == id.as_uuid()
        ));

        execute(&f.publish, &teacher(), PublishCourse { course_id: id }).unwrap();
        let err = execute(&f.publish, &teacher(), PublishCourse { course_id: id }).unwrap_err();

        assert!(matches!(err, DomainError::AlreadyInState { .. }));
        let stored = f.courses.find_by_id(&id).unwrap().unwrap();
        assert_eq!(stored.publish_status(), PublishStatus::Published);

        // created + one published; the rejected publish emits nothing
        assert!(matches!(
            sub.try_recv().unwrap().payload(),
            IntegrationEvent::CoursePublished { .. }
        ));
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn students_cannot_create_courses() {
        let f = fixture();
        let err = f
            .create
            .handle(&Principal::new("alice", Role::Student), cs101())
            .unwrap_err();
        assert_eq!(err.code(), "access_denied");
        assert!(f.courses.is_empty());
    }

    #[test]
    fn publishing_unknown_course_is_not_found() {
        let f = fixture();
        let err = f
            .publish
            .handle(&teacher(), PublishCourse { course_id: CourseId::new() })
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn system_commands_update_counters_and_status() {
        let f = fixture();
        let id = f.create.handle(&teacher(), cs101()).unwrap();

        IncreaseNumberOfStudentsHandler::new(f.courses.clone())
            .handle(&Principal::system(), IncreaseNumberOfStudents { course_id: id })
            .unwrap();
        ApplyApprovalDecisionHandler::new(f.courses.clone())
            .handle(
                &Principal::system(),
                ApplyApprovalDecision {
                    course_id: id,
                    decision: ApprovalDecision::Approve,
                },
            )
            .unwrap();

        let stored = f.courses.find_by_id(&id).unwrap().unwrap();
        assert_eq!(stored.number_of_students().value(), 1);
        assert_eq!(stored.approval_status(), ApprovalStatus::Approved);
    }

    #[test]
    fn duplicate_teacher_registration_is_already_in_state() {
        let teachers = Arc::new(InMemoryRepository::<Teacher>::new());
        let handler = RegisterTeacherHandler::new(teachers);
        let cmd = RegisterTeacher {
            username: Username::new("mrsmith"),
        };

        handler.handle(&Principal::system(), cmd.clone()).unwrap();
        let err = handler.handle(&Principal::system(), cmd).unwrap_err();
        assert_eq!(err.code(), "already_in_state");
    }
}
