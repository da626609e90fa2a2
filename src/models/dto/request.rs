use serde::Serialize;

use crate::models::domain::QuestionType;

/// Submission payload: one entry per question in question order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerPayload>,
}

/// One formatted answer. Exactly one of the three value fields is populated,
/// chosen by the type tag; the others are omitted from the JSON body.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Zero-based option position for single-choice; `-1` when unanswered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<i32>,
    /// Raw text for free-text questions, empty string when unanswered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    /// Zero-based option positions for multi-select, order not significant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_options: Option<Vec<i32>>,
}

impl AnswerPayload {
    pub fn single_choice(question_id: &str, selected_option: i32) -> Self {
        Self {
            question_id: question_id.to_string(),
            question_type: QuestionType::SingleChoice,
            selected_option: Some(selected_option),
            correct_answer: None,
            correct_options: None,
        }
    }

    pub fn free_text(question_id: &str, answer: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            question_type: QuestionType::FreeText,
            selected_option: None,
            correct_answer: Some(answer.to_string()),
            correct_options: None,
        }
    }

    pub fn multi_select(question_id: &str, selected_positions: Vec<i32>) -> Self {
        Self {
            question_id: question_id.to_string(),
            question_type: QuestionType::MultiSelect,
            selected_option: None,
            correct_answer: None,
            correct_options: Some(selected_positions),
        }
    }
}
