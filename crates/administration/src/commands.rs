use blueprint_events::Command;

use crate::proposal::CourseProposalId;

/// Issued when the courses module reports a new course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateCourseProposal {
    pub uuid: CourseProposalId,
}

impl Command for CreateCourseProposal {
    fn command_type(&self) -> &'static str {
        "administration.create_course_proposal"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveCourseProposal {
    pub uuid: CourseProposalId,
}

impl Command for ApproveCourseProposal {
    fn command_type(&self) -> &'static str {
        "administration.approve_course_proposal"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclineCourseProposal {
    pub uuid: CourseProposalId,
}

impl Command for DeclineCourseProposal {
    fn command_type(&self) -> &'static str {
        "administration.decline_course_proposal"
    }
}
