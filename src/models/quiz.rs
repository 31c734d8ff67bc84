// src/models/quiz.rs

use serde::{Deserialize, Serialize};

use crate::{
    engine::{Question, QuizAttemptState},
    models::quiz_result::QuizResult,
};

/// Maximum click history accepted when starting an attempt.
const MAX_CLICK_HISTORY: usize = 64;

/// DTO for starting an attempt.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizRequest {
    /// On-screen positions clicked in earlier attempts, oldest first.
    #[serde(default)]
    pub click_history: Vec<usize>,
}

impl StartQuizRequest {
    /// The most recent clicks, capped in length.
    pub fn recent_clicks(&self) -> &[usize] {
        let start = self.click_history.len().saturating_sub(MAX_CLICK_HISTORY);
        &self.click_history[start..]
    }
}

/// DTO for answering the current question.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_index: usize,
    pub option_id: i64,
}

/// An option as shown to the user (no archetype, no points).
#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: i64,
    pub text: String,
}

/// DTO for sending a question to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub index: usize,
    pub id: i64,
    pub prompt: String,
    pub options: Vec<PublicOption>,
}

impl PublicQuestion {
    pub fn new(index: usize, question: &Question) -> Self {
        Self {
            index,
            id: question.id,
            prompt: question.prompt.clone(),
            options: question
                .options
                .iter()
                .map(|o| PublicOption {
                    id: o.id,
                    text: o.text.clone(),
                })
                .collect(),
        }
    }

    /// The question an attempt is waiting on, if any.
    pub fn current(state: &QuizAttemptState) -> Option<Self> {
        state.current_question().map(|(i, q)| Self::new(i, q))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizResponse {
    pub session_id: String,
    pub total_questions: usize,
    pub question: Option<PublicQuestion>,
}

/// Reply to one answer: either the next question or the stored result.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerResponse {
    #[serde(rename_all = "camelCase")]
    InProgress {
        answered: usize,
        total_questions: usize,
        regenerated: bool,
        question: Option<PublicQuestion>,
    },
    Completed { result: QuizResult },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QuestionBank;

    #[test]
    fn test_public_question_hides_scoring() {
        let bank = QuestionBank::standard();
        let public = PublicQuestion::new(0, &bank.questions()[0]);
        let json = serde_json::to_value(&public).unwrap();

        let option = &json["options"][0];
        assert!(option.get("archetype").is_none());
        assert!(option.get("points").is_none());
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_click_history_is_capped() {
        let req = StartQuizRequest {
            click_history: (0..100).map(|i| i % 4).collect(),
        };
        assert_eq!(req.recent_clicks().len(), MAX_CLICK_HISTORY);
        assert_eq!(req.recent_clicks().last(), Some(&3));
    }
}
