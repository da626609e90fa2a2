use crate::models::domain::{Answer, AnswerStore, Question, QuestionType};
use crate::models::dto::{AnswerPayload, SubmitAnswersRequest};

pub struct SubmissionService;

impl SubmissionService {
    /// Encode the answer store into the wire payload, one entry per question
    /// in question order. Choice answers are encoded as zero-based positions
    /// in the question's option list; an unanswered or unknown single-choice
    /// label encodes as `-1`, an unanswered free-text as the empty string.
    pub fn format_answers(questions: &[Question], store: &AnswerStore) -> SubmitAnswersRequest {
        let answers = questions
            .iter()
            .map(|question| Self::format_question(question, store))
            .collect();

        SubmitAnswersRequest { answers }
    }

    fn format_question(question: &Question, store: &AnswerStore) -> AnswerPayload {
        match store.get(&question.id) {
            Some(Answer::SingleChoice(selected)) => {
                let position = selected
                    .as_deref()
                    .map_or(-1, |label| question.option_position(label));
                AnswerPayload::single_choice(&question.id, position)
            }
            Some(Answer::FreeText(text)) => AnswerPayload::free_text(&question.id, text),
            Some(Answer::MultiSelect(selected)) => {
                let positions = selected
                    .iter()
                    .map(|label| question.option_position(label))
                    .collect();
                AnswerPayload::multi_select(&question.id, positions)
            }
            // The store is seeded with one entry per question at session
            // construction; a missing entry can only mean the question was
            // never part of this session, so encode it as unanswered.
            None => match question.question_type {
                QuestionType::SingleChoice => AnswerPayload::single_choice(&question.id, -1),
                QuestionType::FreeText => AnswerPayload::free_text(&question.id, ""),
                QuestionType::MultiSelect => AnswerPayload::multi_select(&question.id, vec![]),
            },
        }
    }
}
