#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::{Question, QuestionType};
    use crate::models::dto::response::{QuestionResult, ResultSummary, StartQuizResponse};

    /// One question of each content type, ids `q-single`, `q-multi`,
    /// `q-text`.
    pub fn test_questions() -> Vec<Question> {
        vec![
            Question {
                id: "q-single".to_string(),
                question_type: QuestionType::SingleChoice,
                prompt: "Pick one".to_string(),
                options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            },
            Question {
                id: "q-multi".to_string(),
                question_type: QuestionType::MultiSelect,
                prompt: "Pick any".to_string(),
                options: vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
            },
            Question {
                id: "q-text".to_string(),
                question_type: QuestionType::FreeText,
                prompt: "Explain".to_string(),
                options: vec![],
            },
        ]
    }

    /// Start response carrying the three test questions and no time limit.
    pub fn start_response() -> StartQuizResponse {
        start_response_json(None)
    }

    /// Start response with a time limit in minutes.
    pub fn start_response_with_limit(minutes: u64) -> StartQuizResponse {
        start_response_json(Some(minutes))
    }

    fn start_response_json(limit: Option<u64>) -> StartQuizResponse {
        let mut body = serde_json::json!({
            "questionsWithoutCorrectAnswers": [
                {
                    "id": "q-single",
                    "content": {
                        "type": "SINGLE_CHOICE",
                        "question": "Pick one",
                        "options": ["A", "B", "C"]
                    }
                },
                {
                    "id": "q-multi",
                    "content": {
                        "type": "MULTI_SELECT",
                        "question": "Pick any",
                        "options": ["X", "Y", "Z"]
                    }
                },
                {
                    "id": "q-text",
                    "content": { "type": "FREE_TEXT", "question": "Explain" }
                }
            ]
        });
        if let Some(minutes) = limit {
            body["timeLimitMinutes"] = serde_json::json!(minutes);
        }
        serde_json::from_value(body).expect("fixture start response is valid")
    }

    pub fn result_summary() -> ResultSummary {
        ResultSummary {
            obtained_points: 2,
            average_obtained_points: 1.5,
            time_taken: 90,
            average_time_taken: 110.0,
            content: vec![
                QuestionResult {
                    question_id: "q-single".to_string(),
                    correct: true,
                },
                QuestionResult {
                    question_id: "q-multi".to_string(),
                    correct: true,
                },
                QuestionResult {
                    question_id: "q-text".to_string(),
                    correct: false,
                },
            ],
            submission_date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_cover_all_question_types() {
        let questions = test_questions();
        assert_eq!(questions.len(), 3);

        let response = start_response();
        assert_eq!(response.questions_without_correct_answers.len(), 3);
        assert_eq!(response.time_limit_minutes, None);

        let response = start_response_with_limit(5);
        assert_eq!(response.time_limit_minutes, Some(5));
    }
}
