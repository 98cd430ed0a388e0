//! Routes integration events to the system commands of the contexts that
//! keep a local copy of the fact.
//!
//! | Event                          | Reaction                                   |
//! |--------------------------------|--------------------------------------------|
//! | `UserRegistered` (TEACHER)     | courses: register teacher                  |
//! | `UserRegistered` (STUDENT)     | enrollments: student; reviews: reviewer    |
//! | `CourseCreated`                | administration: create course proposal     |
//! | `CourseApproved`/`Declined`    | courses: apply approval decision           |
//! | `CoursePublished`              | reviews + enrollments: local course copy   |
//! | `StudentEnrolled`              | courses: increase number of students       |

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use blueprint_auth::{Principal, Role};
use blueprint_core::{DomainError, DomainResult};
use blueprint_events::{Event, IntegrationEnvelope, IntegrationEvent, execute};

use blueprint_administration::{CourseProposalId, CreateCourseProposal};
use blueprint_courses::{ApplyApprovalDecision, ApprovalDecision, CourseId, IncreaseNumberOfStudents, RegisterTeacher};
use blueprint_enrollments::{CreateEnrollCourse, CreateStudent, EnrollCourseId};
use blueprint_reviews::{CreateReviewableCourse, CreateReviewer, ReviewableCourseId};

use crate::services::AppServices;

/// How many delivered event ids are remembered for duplicate detection.
pub const SEEN_EVENTS_CAPACITY: usize = 1024;

/// Every reaction to one event that failed. The other reactions still ran.
#[derive(Debug, Error)]
#[error("{} reaction(s) to {event_type} failed: {}", .failures.len(), summarize(.failures))]
pub struct ReactionFailures {
    pub event_type: &'static str,
    pub failures: Vec<(&'static str, DomainError)>,
}

fn summarize(failures: &[(&'static str, DomainError)]) -> String {
    failures
        .iter()
        .map(|(reaction, err)| format!("{reaction}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Runs the reactions of one event independently of each other.
struct Fanout {
    event_type: &'static str,
    failures: Vec<(&'static str, DomainError)>,
}

impl Fanout {
    fn new(event_type: &'static str) -> Self {
        Self {
            event_type,
            failures: Vec::new(),
        }
    }

    fn run(mut self, reaction: &'static str, result: DomainResult<()>) -> Self {
        if let Err(err) = result {
            warn!(event_type = self.event_type, reaction, error = %err, "reaction failed");
            self.failures.push((reaction, err));
        }
        self
    }

    fn finish(self) -> Result<(), ReactionFailures> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(ReactionFailures {
            event_type: self.event_type,
            failures: self.failures,
        })
    }
}

/// Apply every reaction `envelope` triggers, as the system principal.
pub fn react(services: &AppServices, envelope: IntegrationEnvelope) -> Result<(), ReactionFailures> {
    let system = Principal::system();
    let event = envelope.into_payload();
    let event_type = event.event_type();
    debug!(event_type, "reacting to integration event");
    let fanout = Fanout::new(event_type);

    match event {
        IntegrationEvent::UserRegistered { username, role, .. } => match role {
            Role::Teacher => fanout.run(
                "register_teacher",
                execute(&services.register_teacher(), &system, RegisterTeacher { username }),
            ),
            Role::Student => fanout
                .run(
                    "create_student",
                    execute(
                        &services.create_student(),
                        &system,
                        CreateStudent {
                            username: username.clone(),
                        },
                    ),
                )
                .run(
                    "create_reviewer",
                    execute(&services.create_reviewer(), &system, CreateReviewer { username }),
                ),
            Role::Admin => fanout,
        },
        IntegrationEvent::CourseCreated { course_id, .. } => fanout.run(
            "create_course_proposal",
            execute(
                &services.create_course_proposal(),
                &system,
                CreateCourseProposal {
                    uuid: CourseProposalId::from(course_id),
                },
            ),
        ),
        IntegrationEvent::CourseApproved { course_id, .. } => fanout.run(
            "apply_approval_decision",
            apply_decision(services, &system, CourseId::from(course_id), ApprovalDecision::Approve),
        ),
        IntegrationEvent::CourseDeclined { course_id, .. } => fanout.run(
            "apply_approval_decision",
            apply_decision(services, &system, CourseId::from(course_id), ApprovalDecision::Decline),
        ),
        IntegrationEvent::CoursePublished { course_id, .. } => fanout
            .run(
                "create_reviewable_course",
                execute(
                    &services.create_reviewable_course(),
                    &system,
                    CreateReviewableCourse {
                        course_id: ReviewableCourseId::from(course_id),
                    },
                ),
            )
            .run(
                "create_enroll_course",
                execute(
                    &services.create_enroll_course(),
                    &system,
                    CreateEnrollCourse {
                        course_id: EnrollCourseId::from(course_id),
                    },
                ),
            ),
        IntegrationEvent::StudentEnrolled { course_id, .. } => fanout.run(
            "increase_number_of_students",
            execute(
                &services.increase_number_of_students(),
                &system,
                IncreaseNumberOfStudents {
                    course_id: CourseId::from(course_id),
                },
            ),
        ),
    }
    .finish()
}

fn apply_decision(
    services: &AppServices,
    system: &Principal,
    course_id: CourseId,
    decision: ApprovalDecision,
) -> DomainResult<()> {
    let handler = services.apply_approval_decision();
    execute(&handler, system, ApplyApprovalDecision { course_id, decision })
}

/// Subscriber side of the reactions: drops redelivered envelopes by event id
/// before reacting.
pub struct Reactor {
    services: Arc<AppServices>,
    seen: HashSet<Uuid>,
    order: VecDeque<Uuid>,
}

impl Reactor {
    pub fn new(services: Arc<AppServices>) -> Self {
        Self {
            services,
            seen: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    pub fn handle(&mut self, envelope: IntegrationEnvelope) -> Result<(), ReactionFailures> {
        let event_id = envelope.event_id();
        if !self.seen.insert(event_id) {
            debug!(%event_id, "dropping duplicate integration event");
            return Ok(());
        }
        self.order.push_back(event_id);
        if self.order.len() > SEEN_EVENTS_CAPACITY
            && let Some(oldest) = self.order.pop_front()
        {
            self.seen.remove(&oldest);
        }
        react(&self.services, envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use blueprint_auth::Username;
    use blueprint_core::Repository;
    use blueprint_events::EventEnvelope;

    use crate::config::AppConfig;
    use crate::simulated_devices::SimulatedDeviceNetwork;

    fn services() -> Arc<AppServices> {
        Arc::new(AppServices::new(
            &AppConfig::default(),
            Arc::new(SimulatedDeviceNetwork::new()),
        ))
    }

    fn student_registered(name: &str) -> IntegrationEnvelope {
        EventEnvelope::wrap(
            "users",
            IntegrationEvent::UserRegistered {
                username: Username::new(name),
                email: format!("{name}@example.com"),
                role: Role::Student,
                occurred_at: Utc::now(),
            },
        )
    }

    #[test]
    fn failing_reaction_does_not_starve_the_next_one() {
        let services = services();
        let bob = Username::new("bob");
        execute(
            &services.create_student(),
            &Principal::system(),
            CreateStudent { username: bob.clone() },
        )
        .unwrap();

        let err = react(&services, student_registered("bob")).unwrap_err();

        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].0, "create_student");
        assert_eq!(err.failures[0].1.code(), "already_in_state");
        assert!(services.reviewers.exists(&bob).unwrap());
    }

    #[test]
    fn published_course_reaches_enrollments_even_if_reviews_already_know_it() {
        let services = services();
        let course = Uuid::now_v7();
        execute(
            &services.create_reviewable_course(),
            &Principal::system(),
            CreateReviewableCourse {
                course_id: ReviewableCourseId::from(course),
            },
        )
        .unwrap();

        let envelope = EventEnvelope::wrap(
            "courses",
            IntegrationEvent::CoursePublished {
                course_id: course,
                occurred_at: Utc::now(),
            },
        );
        let err = react(&services, envelope).unwrap_err();

        assert_eq!(err.failures.len(), 1);
        assert!(services.enroll_courses.exists(&EnrollCourseId::from(course)).unwrap());
    }

    #[test]
    fn redelivered_envelope_is_applied_once() {
        let services = services();
        let mut reactor = Reactor::new(services.clone());
        let envelope = student_registered("carol");

        reactor.handle(envelope.clone()).unwrap();
        reactor.handle(envelope).unwrap();

        assert!(services.students.exists(&Username::new("carol")).unwrap());
        assert_eq!(services.students.len(), 1);
    }
}
