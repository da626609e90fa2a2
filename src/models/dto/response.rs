use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::domain::{Question, QuestionType};

/// Body of a successful start call: the question set stripped of correct
/// answers, plus the quiz's time limit when one is configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizResponse {
    pub questions_without_correct_answers: Vec<QuizQuestionDto>,
    #[serde(default)]
    pub time_limit_minutes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestionDto {
    pub id: String,
    pub content: QuestionContentDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContentDto {
    /// Absent on malformed payloads; normalization treats that as a contract
    /// violation, not a recoverable condition.
    #[serde(rename = "type", default)]
    pub question_type: Option<QuestionType>,
    pub question: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl TryFrom<QuizQuestionDto> for Question {
    type Error = AppError;

    fn try_from(dto: QuizQuestionDto) -> Result<Self, Self::Error> {
        let question_type = dto.question_type_or_err()?;
        let question = Question {
            id: dto.id,
            question_type,
            prompt: dto.content.question,
            options: dto.content.options.unwrap_or_default(),
        };

        if question.has_options() && question.options.is_empty() {
            return Err(AppError::MalformedResponse(format!(
                "Question '{}' is a choice question without options",
                question.id
            )));
        }
        if !question.has_options() && !question.options.is_empty() {
            return Err(AppError::MalformedResponse(format!(
                "Question '{}' is free-text but carries options",
                question.id
            )));
        }

        Ok(question)
    }
}

impl QuizQuestionDto {
    fn question_type_or_err(&self) -> Result<QuestionType, AppError> {
        self.content.question_type.ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "Question '{}' is missing its content type",
                self.id
            ))
        })
    }
}

/// Grading summary returned by a successful submission. Rendered by the
/// result view downstream; carried opaque by the engine.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub obtained_points: i32,
    pub average_obtained_points: f64,
    /// Seconds spent on the attempt as measured by the server.
    pub time_taken: i64,
    pub average_time_taken: f64,
    pub content: Vec<QuestionResult>,
    pub submission_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub correct: bool,
}

/// Error body shape shared by all endpoints. Every field is optional; the
/// server omits what does not apply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub quiz_id: Option<String>,
}
