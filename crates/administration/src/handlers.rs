use chrono::Utc;

use blueprint_auth::{Principal, Role, authorize};
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Repository};
use blueprint_events::{
    Command, CommandHandler, EventBus, IntegrationEnvelope, IntegrationEvent, QueryHandler, publish_or_warn,
};

use crate::commands::{ApproveCourseProposal, CreateCourseProposal, DeclineCourseProposal};
use crate::proposal::{CourseProposal, CourseProposalId};

const SOURCE: &str = "administration";

fn load<R: Repository<CourseProposal>>(proposals: &R, id: CourseProposalId) -> DomainResult<CourseProposal> {
    proposals
        .find_by_id(&id)?
        .ok_or_else(|| DomainError::not_found("Course Proposal", id))
}

pub struct CreateCourseProposalHandler<R> {
    proposals: R,
}

impl<R> CreateCourseProposalHandler<R> {
    pub fn new(proposals: R) -> Self {
        Self { proposals }
    }
}

impl<R> CommandHandler<CreateCourseProposal> for CreateCourseProposalHandler<R>
where
    R: Repository<CourseProposal>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: CreateCourseProposal) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        if self.proposals.exists(&command.uuid)? {
            return Err(DomainError::already_in_state("Course Proposal", command.uuid, "proposed"));
        }
        self.proposals.save(CourseProposal::new(command.uuid))?;
        Ok(())
    }
}

pub struct ApproveCourseProposalHandler<R, B> {
    proposals: R,
    bus: B,
}

impl<R, B> ApproveCourseProposalHandler<R, B> {
    pub fn new(proposals: R, bus: B) -> Self {
        Self { proposals, bus }
    }
}

impl<R, B> CommandHandler<ApproveCourseProposal> for ApproveCourseProposalHandler<R, B>
where
    R: Repository<CourseProposal>,
    B: EventBus<IntegrationEnvelope>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: ApproveCourseProposal) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        let mut proposal = load(&self.proposals, command.uuid)?;
        proposal.approve()?;
        let proposal = self.proposals.save(proposal)?;

        publish_or_warn(
            &self.bus,
            SOURCE,
            IntegrationEvent::CourseApproved {
                course_id: *proposal.id().as_uuid(),
                occurred_at: Utc::now(),
            },
        );
        Ok(())
    }
}

pub struct DeclineCourseProposalHandler<R, B> {
    proposals: R,
    bus: B,
}

impl<R, B> DeclineCourseProposalHandler<R, B> {
    pub fn new(proposals: R, bus: B) -> Self {
        Self { proposals, bus }
    }
}

impl<R, B> CommandHandler<DeclineCourseProposal> for DeclineCourseProposalHandler<R, B>
where
    R: Repository<CourseProposal>,
    B: EventBus<IntegrationEnvelope>,
{
    type Output = ();

    fn handle(&self, principal: &Principal, command: DeclineCourseProposal) -> DomainResult<()> {
        authorize(principal, &[Role::Admin])?;
        command.validate()?;

        let mut proposal = load(&self.proposals, command.uuid)?;
        proposal.decline()?;
        let proposal = self.proposals.save(proposal)?;

        publish_or_warn(
            &self.bus,
            SOURCE,
            IntegrationEvent::CourseDeclined {
                course_id: *proposal.id().as_uuid(),
                occurred_at: Utc::now(),
            },
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListCourseProposals;

pub struct CourseProposalQueryHandler<R> {
    proposals: R,
}

impl<R> CourseProposalQueryHandler<R> {
    pub fn new(proposals: R) -> Self {
        Self { proposals }
    }
}

impl<R> QueryHandler<ListCourseProposals> for CourseProposalQueryHandler<R>
where
    R: Repository<CourseProposal>,
{
    type Output = Vec<CourseProposal>;

    fn handle(&self, principal: &Principal, _query: ListCourseProposals) -> DomainResult<Vec<CourseProposal>> {
        authorize(principal, &[Role::Admin])?;
        self.proposals.list()
    }
}
