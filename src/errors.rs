use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Quiz '{quiz_id}' already has an active session")]
    QuizConflict { quiz_id: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::QuizConflict { .. } => "QUIZ_CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ServerError(_) => "SERVER_ERROR",
            AppError::NetworkError(_) => "NETWORK_ERROR",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::InvalidState(_) => "INVALID_STATE",
        }
    }

    /// Whether the caller may retry the failed operation against the same
    /// session. Malformed responses and state-machine misuse are not
    /// retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::ServerError(_) | AppError::NetworkError(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::MalformedResponse(err.to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
