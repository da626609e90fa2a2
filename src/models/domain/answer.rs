use std::collections::{BTreeSet, HashMap};

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{Question, QuestionType};

/// One answer value, shaped by the question's content type. The variant
/// carries the mutation semantics: single-choice and free-text replace,
/// multi-select toggles membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    SingleChoice(Option<String>),
    MultiSelect(BTreeSet<String>),
    FreeText(String),
}

impl Answer {
    fn empty_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::SingleChoice => Answer::SingleChoice(None),
            QuestionType::MultiSelect => Answer::MultiSelect(BTreeSet::new()),
            QuestionType::FreeText => Answer::FreeText(String::new()),
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            Answer::SingleChoice(selected) => selected.is_some(),
            Answer::MultiSelect(selected) => !selected.is_empty(),
            Answer::FreeText(text) => !text.is_empty(),
        }
    }
}

/// Per-question answers for one session. Every question in the set has an
/// entry from initialization on; "unanswered" is an empty value, never a
/// missing key.
#[derive(Clone, Debug, Default)]
pub struct AnswerStore {
    entries: HashMap<String, Answer>,
}

impl AnswerStore {
    pub fn initialize(questions: &[Question]) -> Self {
        let entries = questions
            .iter()
            .map(|q| (q.id.clone(), Answer::empty_for(q.question_type)))
            .collect();
        Self { entries }
    }

    /// Record a user answer. For single-choice the value is the selected
    /// option label and replaces any previous selection; for free-text it is
    /// the full text and replaces the previous text; for multi-select it is
    /// an option label whose membership is toggled.
    pub fn set(&mut self, question_id: &str, value: &str) -> AppResult<()> {
        let entry = self
            .entries
            .get_mut(question_id)
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", question_id)))?;

        match entry {
            Answer::SingleChoice(selected) => *selected = Some(value.to_string()),
            Answer::FreeText(text) => *text = value.to_string(),
            Answer::MultiSelect(selected) => {
                if !selected.remove(value) {
                    selected.insert(value.to_string());
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.entries.get(question_id)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.entries
            .get(question_id)
            .is_some_and(Answer::is_answered)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
