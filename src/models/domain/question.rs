use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice, // Exactly one option may be selected
    MultiSelect,  // Any subset of the options may be selected
    FreeText,     // Free-form text answer, no options
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub question_type: QuestionType,
    pub prompt: String,
    /// Option labels in server order. The order is load-bearing: submission
    /// encodes an option by its zero-based position in this list.
    pub options: Vec<String>,
}

impl Question {
    /// Zero-based position of `label` in the option list, or `-1` when the
    /// label is not present (including the unanswered case).
    pub fn option_position(&self, label: &str) -> i32 {
        self.options
            .iter()
            .position(|opt| opt == label)
            .map_or(-1, |pos| pos as i32)
    }

    pub fn has_options(&self) -> bool {
        matches!(
            self.question_type,
            QuestionType::SingleChoice | QuestionType::MultiSelect
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: "q-1".to_string(),
            question_type: QuestionType::SingleChoice,
            prompt: "Pick one".to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        }
    }

    #[test]
    fn question_type_round_trip_serialization() {
        let variants = [
            QuestionType::SingleChoice,
            QuestionType::MultiSelect,
            QuestionType::FreeText,
        ];

        for variant in variants {
            let json = serde_json::to_string(&variant).expect("variant should serialize");
            let parsed: QuestionType =
                serde_json::from_str(&json).expect("variant should deserialize");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn question_type_uses_wire_tags() {
        assert_eq!(
            serde_json::to_string(&QuestionType::SingleChoice).unwrap(),
            "\"SINGLE_CHOICE\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionType::MultiSelect).unwrap(),
            "\"MULTI_SELECT\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionType::FreeText).unwrap(),
            "\"FREE_TEXT\""
        );
    }

    #[test]
    fn question_type_rejects_unknown_variant() {
        let invalid = "\"ESSAY\"";
        let parsed = serde_json::from_str::<QuestionType>(invalid);

        assert!(parsed.is_err());
    }

    #[test]
    fn has_options_is_true_only_for_choice_types() {
        let mut question = sample_question();
        assert!(question.has_options());

        question.question_type = QuestionType::MultiSelect;
        assert!(question.has_options());

        question.question_type = QuestionType::FreeText;
        assert!(!question.has_options());
    }

    #[test]
    fn option_position_finds_label_or_returns_minus_one() {
        let question = sample_question();

        assert_eq!(question.option_position("A"), 0);
        assert_eq!(question.option_position("B"), 1);
        assert_eq!(question.option_position("C"), 2);
        assert_eq!(question.option_position("D"), -1);
        assert_eq!(question.option_position(""), -1);
    }
}
