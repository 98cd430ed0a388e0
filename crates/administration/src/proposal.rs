use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_core::{AggregateRoot, DomainError, DomainResult, SurrogateId, impl_uuid_newtype};

/// Same value as the proposed course's identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseProposalId(Uuid);

impl_uuid_newtype!(CourseProposalId, "CourseProposalId");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseProposalStatus {
    WaitingForApproval,
    Approved,
    Declined,
}

/// Aggregate root: CourseProposal.
///
/// # Invariants
/// - Approving an approved proposal, or declining a declined one, is rejected.
/// - A decision may be reversed (approved → declined and back).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseProposal {
    #[serde(skip)]
    surrogate_id: Option<SurrogateId>,
    uuid: CourseProposalId,
    status: CourseProposalStatus,
}

impl CourseProposal {
    pub fn new(uuid: CourseProposalId) -> Self {
        Self {
            surrogate_id: None,
            uuid,
            status: CourseProposalStatus::WaitingForApproval,
        }
    }

    pub fn status(&self) -> CourseProposalStatus {
        self.status
    }

    pub fn approve(&mut self) -> DomainResult<()> {
        if self.status == CourseProposalStatus::Approved {
            return Err(DomainError::already_in_state("Course Proposal", self.uuid, "approved"));
        }
        self.status = CourseProposalStatus::Approved;
        Ok(())
    }

    pub fn decline(&mut self) -> DomainResult<()> {
        if self.status == CourseProposalStatus::Declined {
            return Err(DomainError::already_in_state("Course Proposal", self.uuid, "declined"));
        }
        self.status = CourseProposalStatus::Declined;
        Ok(())
    }
}

impl AggregateRoot for CourseProposal {
    type Id = CourseProposalId;

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

    #[derive(Debug, Clone, Copy)]
    enum Decision {
        Approve,
        Decline,
    }

    fn apply(p: &mut CourseProposal, d: Decision) -> DomainResult<()> {
        match d {
            Decision::Approve => p.approve(),
            Decision::Decline => p.decline(),
        }
    }

    #[test]
    fn approve_twice_is_already_in_state() {
        let mut p = CourseProposal::new(CourseProposalId::new());
        p.approve().unwrap();

        let err = p.approve().unwrap_err();
        assert!(err.to_string().ends_with("is already approved"));
        assert!(err.to_string().starts_with("Course Proposal with id: "));
    }

    #[test]
    fn decision_can_be_reversed() {
        let mut p = CourseProposal::new(CourseProposalId::new());
        p.approve().unwrap();
        p.decline().unwrap();
        assert_eq!(p.status(), CourseProposalStatus::Declined);
    }

    proptest! {
        #[test]
        fn a_decision_fails_iff_it_repeats_the_current_status(
            decisions in proptest::collection::vec(prop_oneof![Just(Decision::Approve), Just(Decision::Decline)], 0..20)
        ) {
            let mut p = CourseProposal::new(CourseProposalId::new());
            for d in decisions {
                let before = p.status();
                let repeats = matches!(
                    (d, before),
                    (Decision::Approve, CourseProposalStatus::Approved)
                        | (Decision::Decline, CourseProposalStatus::Declined)
                );
                let result = apply(&mut p, d);
                prop_assert_eq!(result.is_err(), repeats);
                if repeats {
                    prop_assert_eq!(p.status(), before);
                }
            }
        }
    }
}
