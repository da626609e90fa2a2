pub mod http;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::errors::AppResult;
use crate::models::dto::{ResultSummary, StartQuizResponse, SubmitAnswersRequest};

pub use http::HttpQuizApi;

/// Server-side session lifecycle: start, stop, submit. The engine only ever
/// talks to the server through this seam.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// Ask the server to open a session for `quiz_id`. Fails with
    /// `AppError::QuizConflict` when the user already holds an active
    /// session (for this quiz or another).
    async fn start_quiz(&self, quiz_id: &str) -> AppResult<StartQuizResponse>;

    /// Abandon the server-side session for `quiz_id` without grading.
    async fn stop_quiz(&self, quiz_id: &str) -> AppResult<()>;

    /// Submit formatted answers for grading and close the session.
    async fn submit_answers(
        &self,
        quiz_id: &str,
        request: SubmitAnswersRequest,
    ) -> AppResult<ResultSummary>;
}
