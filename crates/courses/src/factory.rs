use blueprint_auth::Principal;
use blueprint_core::{DomainError, DomainResult, Repository};
use blueprint_events::Command;

use crate::commands::{CreateCourse, CreateCurriculumItemKind};
use crate::course::{Course, CourseId, CurriculumItem, CurriculumItemKind, Question};
use crate::teacher::Teacher;

/// Builds new courses after validating the command and resolving the teacher.
pub struct CourseFactory<T> {
    teachers: T,
}

impl<T> CourseFactory<T>
where
    T: Repository<Teacher>,
{
    pub fn new(teachers: T) -> Self {
        Self { teachers }
    }

    /// Validate, resolve the calling teacher, then construct.
    ///
    /// Curriculum items get serial numbers `1..=n` in submission order.
    pub fn create(&self, principal: &Principal, command: CreateCourse) -> DomainResult<Course> {
        command.validate()?;

        let teacher = self
            .teachers
            .find_by_id(principal.username())?
            .ok_or_else(|| DomainError::unresolved("Teacher", principal.username()))?;

        let curriculum = command
            .curriculum_items
            .into_iter()
            .zip(1u32..)
            .map(|(item, serial_number)| {
                let kind = match item.kind {
                    CreateCurriculumItemKind::Lecture => CurriculumItemKind::Lecture,
                    CreateCurriculumItemKind::Quiz { questions } => CurriculumItemKind::Quiz {
                        questions: questions
                            .into_iter()
                            .map(|q| Question { content: q.content })
                            .collect(),
                    },
                };
                CurriculumItem::new(item.title, item.description, serial_number, kind)
            })
            .collect();

        Ok(Course::new(
            CourseId::new(),
            command.name,
            command.description,
            teacher.username().clone(),
            curriculum,
        ))
    }
}
