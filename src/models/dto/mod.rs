pub mod request;
pub mod response;

pub use request::{AnswerPayload, SubmitAnswersRequest};
pub use response::{ApiErrorBody, QuizQuestionDto, ResultSummary, StartQuizResponse};
