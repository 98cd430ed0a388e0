use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blueprint_auth::Username;
use blueprint_core::{AggregateRoot, DomainError, DomainResult, Entity, SurrogateId, ValueObject, impl_uuid_newtype};

/// External identifier of a course, shared with every module that references it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl_uuid_newtype!(CourseId, "CourseId");

// ─────────────────────────────────────────────────────────────────────────────
// Value objects
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberOfStudents(u32);

impl NumberOfStudents {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// One more student; saturates instead of wrapping.
    pub fn increased(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl ValueObject for NumberOfStudents {}

/// Average review rating in `0.0..=5.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseRating(f64);

impl CourseRating {
    pub const MAX: f64 = 5.0;

    pub fn new(rating: f64) -> DomainResult<Self> {
        if !(0.0..=Self::MAX).contains(&rating) {
            return Err(DomainError::validation(format!(
                "course rating must be between 0 and {}, got {rating}",
                Self::MAX
            )));
        }
        Ok(Self(rating))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for CourseRating {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    WaitingForApproval,
    Approved,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishStatus {
    Draft,
    Published,
}

/// Outcome of a course proposal review in administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalDecision {
    Approve,
    Decline,
}

impl ApprovalDecision {
    fn target(self) -> (ApprovalStatus, &'static str) {
        match self {
            ApprovalDecision::Approve => (ApprovalStatus::Approved, "approved"),
            ApprovalDecision::Decline => (ApprovalStatus::Declined, "declined"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Curriculum
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub content: String,
}

/// Variant-specific part of a curriculum item, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurriculumItemKind {
    Lecture,
    Quiz { questions: Vec<Question> },
}

/// One entry of a course curriculum.
///
/// `serial_number` is the 1-based position assigned when the course is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumItem {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub serial_number: u32,
    #[serde(flatten)]
    pub kind: CurriculumItemKind,
}

impl CurriculumItem {
    pub fn new(title: String, description: String, serial_number: u32, kind: CurriculumItemKind) -> Self {
        Self {
            uuid: Uuid::now_v7(),
            title,
            description,
            serial_number,
            kind,
        }
    }

    pub fn question_count(&self) -> usize {
        match &self.kind {
            CurriculumItemKind::Lecture => 0,
            CurriculumItemKind::Quiz { questions } => questions.len(),
        }
    }
}

impl Entity for CurriculumItem {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.uuid
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate root: Course.
///
/// # Invariants
/// - Publication is one-way: a published course cannot be published again.
/// - A declined course is never published.
/// - The number of students only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    surrogate_id: Option<SurrogateId>,
    id: CourseId,
    name: String,
    description: String,
    teacher: Username,
    curriculum: Vec<CurriculumItem>,
    number_of_students: NumberOfStudents,
    rating: CourseRating,
    approval_status: ApprovalStatus,
    publish_status: PublishStatus,
}

impl Course {
    pub fn new(
        id: CourseId,
        name: String,
        description: String,
        teacher: Username,
        curriculum: Vec<CurriculumItem>,
    ) -> Self {
        Self {
            surrogate_id: None,
            id,
            name,
            description,
            teacher,
            curriculum,
            number_of_students: NumberOfStudents::default(),
            rating: CourseRating::default(),
            approval_status: ApprovalStatus::WaitingForApproval,
            publish_status: PublishStatus::Draft,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn teacher(&self) -> &Username {
        &self.teacher
    }

    pub fn curriculum(&self) -> &[CurriculumItem] {
        &self.curriculum
    }

    pub fn number_of_students(&self) -> NumberOfStudents {
        self.number_of_students
    }

    pub fn rating(&self) -> CourseRating {
        self.rating
    }

    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status
    }

    pub fn publish_status(&self) -> PublishStatus {
        self.publish_status
    }

    pub fn publish(&mut self) -> DomainResult<()> {
        if self.publish_status == PublishStatus::Published {
            return Err(DomainError::already_in_state("Course", self.id, "published"));
        }
        if self.approval_status == ApprovalStatus::Declined {
            return Err(DomainError::invariant(format!(
                "course {} was declined and cannot be published",
                self.id
            )));
        }
        self.publish_status = PublishStatus::Published;
        Ok(())
    }

    pub fn increase_number_of_students(&mut self) {
        self.number_of_students = self.number_of_students.increased();
    }

    pub fn apply_approval_decision(&mut self, decision: ApprovalDecision) -> DomainResult<()> {
        let (target, state) = decision.target();
        if self.approval_status == target {
            return Err(DomainError::already_in_state("Course", self.id, state));
        }
        self.approval_status = target;
        Ok(())
    }
}

impl AggregateRoot for Course {
    type Id = CourseId;

    fn id(&self) -> &Self::Id {
        &self.id
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

    fn course() -> Course {
        Course::new(
            CourseId::new(),
            "CS101".into(),
            "Intro".into(),
            Username::new("mrsmith"),
            vec![
                CurriculumItem::new("Welcome".into(), "".into(), 1, CurriculumItemKind::Lecture),
                CurriculumItem::new(
                    "Check".into(),
                    "".into(),
                    2,
                    CurriculumItemKind::Quiz {
                        questions: vec![Question { content: "2+2?".into() }],
                    },
                ),
            ],
        )
    }

    #[test]
    fn new_course_waits_for_approval_as_draft() {
        let c = course();
        assert_eq!(c.approval_status(), ApprovalStatus::WaitingForApproval);
        assert_eq!(c.publish_status(), PublishStatus::Draft);
        assert_eq!(c.number_of_students().value(), 0);
    }

    #[test]
    fn publishing_twice_is_already_in_state() {
        let mut c = course();
        c.publish().unwrap();

        let err = c.publish().unwrap_err();
        assert!(matches!(err, DomainError::AlreadyInState { state: "published", .. }));
        assert_eq!(c.publish_status(), PublishStatus::Published);
    }

    #[test]
    fn declined_course_cannot_be_published() {
        let mut c = course();
        c.apply_approval_decision(ApprovalDecision::Decline).unwrap();

        assert_eq!(c.publish().unwrap_err().code(), "invariant_violation");
        assert_eq!(c.publish_status(), PublishStatus::Draft);
    }

    #[test]
    fn repeating_a_decision_is_already_in_state() {
        let mut c = course();
        c.apply_approval_decision(ApprovalDecision::Approve).unwrap();
        let err = c.apply_approval_decision(ApprovalDecision::Approve).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyInState { state: "approved", .. }));
    }

    #[test]
    fn curriculum_items_serialize_with_type_discriminator() {
        let c = course();
        let json = serde_json::to_value(c.curriculum()).unwrap();

        assert_eq!(json[0]["type"], "LECTURE");
        assert_eq!(json[1]["type"], "QUIZ");
        assert_eq!(json[1]["questions"][0]["content"], "2+2?");
        assert_eq!(json[1]["serial_number"], 2);

        let back: Vec<CurriculumItem> = serde_json::from_value(json).unwrap();
        assert_eq!(back[1].question_count(), 1);
    }

    proptest! {
        #[test]
        fn rating_accepts_only_zero_to_five(r in -10.0f64..10.0) {
            prop_assert_eq!(CourseRating::new(r).is_ok(), (0.0..=5.0).contains(&r));
        }

        #[test]
        fn enrollment_count_matches_increments(n in 0u32..200) {
            let mut c = course();
            for _ in 0..n {
                c.increase_number_of_students();
            }
            prop_assert_eq!(c.number_of_students().value(), n);
        }
    }
}
