use chrono::{DateTime, Duration, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::domain::answer::AnswerStore;
use crate::models::domain::question::Question;

/// Bounded index over the question sequence. Clamped at both ends, never
/// wraps; sequential movement only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    fn next(&mut self) {
        if self.index + 1 < self.len {
            self.index += 1;
        }
    }

    fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }
}

/// One in-memory quiz attempt: the immutable question sequence, the answer
/// store, the navigation cursor and the fixed deadline. Lives from a
/// successful start until the engine reaches a terminal state.
#[derive(Clone, Debug)]
pub struct Session {
    quiz_id: String,
    questions: Vec<Question>,
    answers: AnswerStore,
    cursor: Cursor,
    started_at: DateTime<Utc>,
    deadline: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(
        quiz_id: &str,
        questions: Vec<Question>,
        time_limit_minutes: Option<u64>,
    ) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::MalformedResponse(format!(
                "Quiz '{}' returned an empty question set",
                quiz_id
            )));
        }

        let answers = AnswerStore::initialize(&questions);
        let cursor = Cursor::new(questions.len());
        let started_at = Utc::now();
        let deadline =
            time_limit_minutes.map(|minutes| started_at + Duration::seconds(minutes as i64 * 60));

        Ok(Self {
            quiz_id: quiz_id.to_string(),
            questions,
            answers,
            cursor,
            started_at,
            deadline,
        })
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index
    }

    pub fn current_question(&self) -> &Question {
        // Cursor invariant keeps the index in bounds for the session's lifetime
        &self.questions[self.cursor.index]
    }

    pub fn next_question(&mut self) {
        self.cursor.next();
    }

    pub fn previous_question(&mut self) {
        self.cursor.previous();
    }

    pub fn answer(&mut self, question_id: &str, value: &str) -> AppResult<()> {
        self.answers.set(question_id, value)
    }

    /// Ids of questions still carrying an empty answer value, in question
    /// order. Feeds the non-blocking warning shown before submission.
    pub fn unanswered_question_ids(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|q| !self.answers.is_answered(&q.id))
            .map(|q| q.id.as_str())
            .collect()
    }
}
