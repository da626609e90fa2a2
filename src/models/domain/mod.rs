pub mod answer;
pub mod question;
pub mod session;

pub use answer::{Answer, AnswerStore};
pub use question::{Question, QuestionType};
pub use session::Session;
