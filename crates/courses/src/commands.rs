use serde::Deserialize;

use blueprint_auth::Username;
use blueprint_core::{DomainResult, Violations};
use blueprint_events::Command;

use crate::course::{ApprovalDecision, CourseId};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateQuestion {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateCurriculumItemKind {
    Lecture,
    Quiz { questions: Vec<CreateQuestion> },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCurriculumItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: CreateCurriculumItemKind,
}

/// Create a course owned by the calling teacher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub curriculum_items: Vec<CreateCurriculumItem>,
}

impl Command for CreateCourse {
    fn command_type(&self) -> &'static str {
        "courses.create"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("name", &self.name)
            .not_blank("description", &self.description);

        for (i, item) in self.curriculum_items.iter().enumerate() {
            v.not_blank(&format!("curriculum_items[{i}].title"), &item.title);
            if let CreateCurriculumItemKind::Quiz { questions } = &item.kind {
                for (j, q) in questions.iter().enumerate() {
                    v.not_blank(&format!("curriculum_items[{i}].questions[{j}].content"), &q.content);
                }
            }
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishCourse {
    pub course_id: CourseId,
}

impl Command for PublishCourse {
    fn command_type(&self) -> &'static str {
        "courses.publish"
    }
}

/// Issued when enrollments reports a new student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncreaseNumberOfStudents {
    pub course_id: CourseId,
}

impl Command for IncreaseNumberOfStudents {
    fn command_type(&self) -> &'static str {
        "courses.increase_number_of_students"
    }
}

/// Issued when administration approves or declines the course proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyApprovalDecision {
    pub course_id: CourseId,
    pub decision: ApprovalDecision,
}

impl Command for ApplyApprovalDecision {
    fn command_type(&self) -> &'static str {
        "courses.apply_approval_decision"
    }
}

/// Issued when a user registers with the TEACHER role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTeacher {
    pub username: Username,
}

impl Command for RegisterTeacher {
    fn command_type(&self) -> &'static str {
        "courses.register_teacher"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("username", self.username.as_str());
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_and_description_are_both_reported() {
        let cmd = CreateCourse {
            name: "".into(),
            description: "  ".into(),
            curriculum_items: vec![],
        };
        let err = cmd.validate().unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "description"]);
    }

    #[test]
    fn nested_curriculum_fields_are_indexed() {
        let cmd: CreateCourse = serde_json::from_value(serde_json::json!({
            "name": "CS101",
            "description": "Intro",
            "curriculum_items": [
                { "type": "LECTURE", "title": "Welcome" },
                { "type": "QUIZ", "title": "", "questions": [{ "content": "ok" }, { "content": "" }] }
            ]
        }))
        .unwrap();

        let err = cmd.validate().unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["curriculum_items[1].title", "curriculum_items[1].questions[1].content"]
        );
    }
}
