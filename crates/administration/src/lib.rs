//! `blueprint-administration`: approval of course proposals.
//!
//! Every created course becomes a proposal here. Admins approve or decline it and
//! the decision travels back to the courses module as an integration event.

pub mod commands;
pub mod handlers;
pub mod proposal;

pub use commands::{ApproveCourseProposal, CreateCourseProposal, DeclineCourseProposal};
pub use handlers::{
    ApproveCourseProposalHandler, CourseProposalQueryHandler, CreateCourseProposalHandler,
    DeclineCourseProposalHandler, ListCourseProposals,
};
pub use proposal::{CourseProposal, CourseProposalId, CourseProposalStatus};
