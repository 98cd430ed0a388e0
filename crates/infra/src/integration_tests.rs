//! Cross-context flows over the in-memory bus, the integration worker and the
//! reconcile job.
//!
//! Contexts only learn about each other through integration events, so every
//! assertion on another context's state polls until the worker caught up.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use blueprint_auth::{Principal, Role};
    use blueprint_core::{DomainResult, Repository};
    use blueprint_events::{CommandHandler, QueryHandler};

    use blueprint_administration::{ApproveCourseProposal, CourseProposalId, DeclineCourseProposal};
    use blueprint_courses::{ApprovalStatus, CourseId, CreateCourse, GetCourse, PublishCourse};
    use blueprint_devices::{
        Capacity, ExchangeCode, GetCapacityForExchange, GetBroadbandAccessDeviceDetails, Hostname,
    };
    use blueprint_enrollments::{EnrollCourseId, EnrollToCourse};
    use blueprint_reviews::{ReviewCourse, ReviewableCourseId};
    use blueprint_users::UserRegistration;

    use crate::config::AppConfig;
    use crate::demo;
    use crate::jobs::{JobResults, ReconcileBroadbandAccessDeviceJob};
    use crate::runtime::Runtime;
    use crate::services::AppServices;
    use crate::simulated_devices::SimulatedDeviceNetwork;

    fn config() -> AppConfig {
        AppConfig {
            // Keep the scheduler out of the way of explicit runs.
            reconcile_initial_delay: Duration::from_secs(3600),
            seed_demo_data: false,
            ..AppConfig::default()
        }
    }

    fn start() -> (Arc<AppServices>, Runtime) {
        let cfg = config();
        let services = Arc::new(AppServices::new(&cfg, Arc::new(SimulatedDeviceNetwork::new())));
        let runtime = Runtime::start(services.clone(), &cfg);
        (services, runtime)
    }

    fn eventually(what: &str, mut check: impl FnMut() -> bool) {
        for _ in 0..200 {
            if check() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("timed out waiting for {what}");
    }

    fn sign_up(services: &AppServices, username: &str, role: Role) -> Principal {
        services
            .register_user()
            .handle(
                &Principal::anonymous(),
                UserRegistration {
                    username: username.into(),
                    email: format!("{username}@example.com"),
                    password: "password123".into(),
                    role: Some(role),
                },
            )
            .unwrap();
        Principal::new(username, role)
    }

    fn create_course(services: &AppServices, teacher: &Principal) -> DomainResult<CourseId> {
        services.create_course().handle(
            teacher,
            CreateCourse {
                name: "Rust for Java developers".into(),
                description: "Ownership without tears".into(),
                curriculum_items: vec![],
            },
        )
    }

    fn approval_status(services: &AppServices, course_id: CourseId) -> ApprovalStatus {
        services
            .course_queries()
            .handle(&Principal::system(), GetCourse { course_id })
            .unwrap()
            .summary
            .approval_status
    }

    #[test]
    fn course_lifecycle_across_contexts() {
        let (services, runtime) = start();
        let admin = Principal::new("root", Role::Admin);

        let teacher = sign_up(&services, "mrsmith", Role::Teacher);
        eventually("teacher registration", || {
            services.teachers.exists(teacher.username()).unwrap()
        });

        let course_id = create_course(&services, &teacher).unwrap();
        let proposal = CourseProposalId::from(*course_id.as_uuid());
        eventually("course proposal", || services.proposals.exists(&proposal).unwrap());

        services
            .approve_course_proposal()
            .handle(&admin, ApproveCourseProposal { uuid: proposal })
            .unwrap();
        eventually("approval reaching courses", || {
            approval_status(&services, course_id) == ApprovalStatus::Approved
        });

        services
            .publish_course()
            .handle(&teacher, PublishCourse { course_id })
            .unwrap();
        let enroll_course = EnrollCourseId::from(*course_id.as_uuid());
        let reviewable = ReviewableCourseId::from(*course_id.as_uuid());
        eventually("published course copies", || {
            services.enroll_courses.exists(&enroll_course).unwrap()
                && services.reviewable_courses.exists(&reviewable).unwrap()
        });

        let student = sign_up(&services, "alice", Role::Student);
        eventually("student and reviewer copies", || {
            services.students.exists(student.username()).unwrap()
                && services.reviewers.exists(student.username()).unwrap()
        });

        services
            .enroll_to_course()
            .handle(
                &student,
                EnrollToCourse {
                    course_id: Some(enroll_course),
                },
            )
            .unwrap();
        eventually("student count", || {
            services
                .courses
                .find_by_id(&course_id)
                .unwrap()
                .is_some_and(|c| c.number_of_students().value() == 1)
        });

        services
            .review_course()
            .handle(
                &student,
                ReviewCourse {
                    course_id: Some(reviewable),
                    rating: Some(4.5),
                    comment: Some("clear and practical".into()),
                },
            )
            .unwrap();

        runtime.shutdown();
    }

    #[test]
    fn declined_course_cannot_be_published() {
        let (services, runtime) = start();
        let teacher = sign_up(&services, "mrsmith", Role::Teacher);
        eventually("teacher registration", || services.teachers.exists(teacher.username()).unwrap());

        let course_id = create_course(&services, &teacher).unwrap();
        let proposal = CourseProposalId::from(*course_id.as_uuid());
        eventually("course proposal", || services.proposals.exists(&proposal).unwrap());

        services
            .decline_course_proposal()
            .handle(&Principal::new("root", Role::Admin), DeclineCourseProposal { uuid: proposal })
            .unwrap();
        eventually("decline reaching courses", || {
            approval_status(&services, course_id) == ApprovalStatus::Declined
        });

        let err = services
            .publish_course()
            .handle(&teacher, PublishCourse { course_id })
            .unwrap_err();
        assert_eq!(err.code(), "invariant_violation");

        runtime.shutdown();
    }

    #[test]
    fn course_creation_requires_registered_teacher() {
        let (services, runtime) = start();
        let err = create_course(&services, &Principal::new("ghost", Role::Teacher)).unwrap_err();
        assert_eq!(err.to_string(), "Teacher cannot be found by id = ghost");
        runtime.shutdown();
    }

    #[test]
    fn reconcile_job_over_demo_devices() {
        let cfg = config();
        let network = Arc::new(SimulatedDeviceNetwork::new());
        let services = AppServices::new(&cfg, network.clone());
        demo::seed(&services, &network).unwrap();

        let results = Arc::new(JobResults::default());
        let job = ReconcileBroadbandAccessDeviceJob::new(services.reconcile_devices(), results.clone());

        let first = job.run_once();
        assert_eq!((first.successes, first.failures), (2, 1));

        // Only the silent device keeps failing once the model caught up.
        let second = job.run_once();
        assert_eq!((second.successes, second.failures), (0, 1));
        assert_eq!(results.history().len(), 2);

        let details = services
            .device_queries()
            .handle(
                &Principal::anonymous(),
                GetBroadbandAccessDeviceDetails {
                    hostname: Hostname::new("device2.exlon.com"),
                },
            )
            .unwrap();
        assert_eq!(details.serial_number.as_deref(), Some("serial2-replaced"));

        let capacity = services
            .device_queries()
            .handle(
                &Principal::anonymous(),
                GetCapacityForExchange {
                    exchange_code: ExchangeCode::new(demo::DEMO_EXCHANGE),
                },
            )
            .unwrap();
        assert_eq!(
            capacity,
            Capacity {
                has_adsl_capacity: true,
                has_fibre_capacity: false,
            }
        );
    }
}
