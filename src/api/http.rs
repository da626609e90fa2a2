use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::api::QuizApi;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::dto::{ApiErrorBody, ResultSummary, StartQuizResponse, SubmitAnswersRequest};

/// Marker the server sets on the 409 body when the user already holds an
/// active session.
const CONFLICT_MARKER: &str = "InvalidQuizStateException";

pub struct HttpQuizApi {
    client: Client,
    base_url: String,
    access_token: Option<SecretString>,
}

impl HttpQuizApi {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let mut builder = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    async fn map_error(response: Response, requested_quiz_id: &str) -> AppError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        Self::classify_error(status, body, requested_quiz_id)
    }

    /// Map a non-success status and error body to the error taxonomy. Only a
    /// 409 carrying the conflict marker becomes `QuizConflict`, with the
    /// offending quiz id falling back to the requested id when the body
    /// omits it; any other 409 is an ordinary server error.
    fn classify_error(status: StatusCode, body: ApiErrorBody, requested_quiz_id: &str) -> AppError {
        if status == StatusCode::CONFLICT && body.error.as_deref() == Some(CONFLICT_MARKER) {
            let quiz_id = body
                .quiz_id
                .unwrap_or_else(|| requested_quiz_id.to_string());
            log::info!("Quiz '{}' reported an active session conflict", quiz_id);
            return AppError::QuizConflict { quiz_id };
        }

        let message = body
            .message
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => {
                log::warn!("Quiz API request failed ({}): {}", status, message);
                AppError::ServerError(message)
            }
        }
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn start_quiz(&self, quiz_id: &str) -> AppResult<StartQuizResponse> {
        let response = self
            .post(&format!("/quizzes/quiz/start/{}", quiz_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::map_error(response, quiz_id).await);
        }

        let body = response.json::<StartQuizResponse>().await?;
        log::info!(
            "Started quiz '{}' with {} questions",
            quiz_id,
            body.questions_without_correct_answers.len()
        );
        Ok(body)
    }

    async fn stop_quiz(&self, quiz_id: &str) -> AppResult<()> {
        let response = self
            .post(&format!("/quizzes/quiz/stop/{}", quiz_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::map_error(response, quiz_id).await);
        }

        log::info!("Stopped quiz '{}'", quiz_id);
        Ok(())
    }

    async fn submit_answers(
        &self,
        quiz_id: &str,
        request: SubmitAnswersRequest,
    ) -> AppResult<ResultSummary> {
        let response = self
            .post(&format!("/quizzes/quiz/answer/submit/{}", quiz_id))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::map_error(response, quiz_id).await);
        }

        let summary = response.json::<ResultSummary>().await?;
        log::info!(
            "Submitted quiz '{}': {} points",
            quiz_id,
            summary.obtained_points
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash_from_base_url() {
        let mut config = Config::test_config();
        config.api_base_url = "http://localhost:8080/api/".to_string();

        let api = HttpQuizApi::new(&config).unwrap();
        assert_eq!(api.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn new_accepts_config_without_token() {
        let mut config = Config::test_config();
        config.access_token = None;

        let api = HttpQuizApi::new(&config).unwrap();
        assert!(api.access_token.is_none());
    }

    #[test]
    fn conflict_status_with_marker_maps_to_quiz_conflict() {
        let body = ApiErrorBody {
            error: Some(CONFLICT_MARKER.to_string()),
            message: Some("Quiz already in progress".to_string()),
            quiz_id: Some("Q7".to_string()),
        };

        let err = HttpQuizApi::classify_error(StatusCode::CONFLICT, body, "quiz-1");
        assert_eq!(
            err,
            AppError::QuizConflict {
                quiz_id: "Q7".to_string()
            }
        );
    }

    #[test]
    fn conflict_body_without_quiz_id_falls_back_to_requested_id() {
        let body = ApiErrorBody {
            error: Some(CONFLICT_MARKER.to_string()),
            message: None,
            quiz_id: None,
        };

        let err = HttpQuizApi::classify_error(StatusCode::CONFLICT, body, "quiz-1");
        assert_eq!(
            err,
            AppError::QuizConflict {
                quiz_id: "quiz-1".to_string()
            }
        );
    }

    #[test]
    fn conflict_status_without_marker_is_a_server_error() {
        let body = ApiErrorBody {
            error: Some("DuplicateSubmissionException".to_string()),
            message: Some("Already submitted".to_string()),
            quiz_id: None,
        };

        let err = HttpQuizApi::classify_error(StatusCode::CONFLICT, body, "quiz-1");
        assert_eq!(err, AppError::ServerError("Already submitted".to_string()));
    }

    #[test]
    fn not_found_status_maps_to_not_found() {
        let body = ApiErrorBody {
            error: Some("QuizNotFoundException".to_string()),
            message: Some("No such quiz".to_string()),
            quiz_id: None,
        };

        let err = HttpQuizApi::classify_error(StatusCode::NOT_FOUND, body, "quiz-1");
        assert_eq!(err, AppError::NotFound("No such quiz".to_string()));
    }

    #[test]
    fn empty_error_body_falls_back_to_status_message() {
        let err =
            HttpQuizApi::classify_error(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorBody::default(), "quiz-1");
        assert_eq!(err, AppError::ServerError("HTTP 500".to_string()));
    }
}
