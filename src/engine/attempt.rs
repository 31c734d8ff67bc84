// src/engine/attempt.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    archetype::{Archetype, ScoreTally},
    bank::{Question, QuestionBank},
    error::EngineError,
    monitor::{Distribution, debias_remaining},
    randomizer::{SessionQuestionSet, create_session_question_set, dominant_position},
    scoring::{AnswerRecord, record_answer, resolve, tally_answers},
};

/// Everything one quiz attempt carries between answers.
///
/// Engine calls consume the state and hand back the next one, so the
/// question set, click pattern, distribution and tally always move together.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptState {
    session_id: String,
    questions: SessionQuestionSet,
    responses: BTreeMap<usize, AnswerRecord>,
    click_pattern: Vec<usize>,
    distribution: Distribution,
    tally: ScoreTally,
}

/// Result of applying one answer.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub state: QuizAttemptState,
    /// True when the anti-repetition countermeasure re-ordered the remaining questions.
    pub regenerated: bool,
}

/// The `answers` document stored with a quiz result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    pub responses: BTreeMap<usize, AnswerRecord>,
    pub scores: ScoreTally,
    pub total_questions: usize,
    pub completed_at: DateTime<Utc>,
}

/// Payload handed to persistence when an attempt completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub archetype: Archetype,
    pub score: i64,
    pub answers: QuizAnswers,
    pub session_id: String,
}

impl QuizAttemptState {
    /// Starts an attempt with a freshly randomized question set.
    pub fn start<R: Rng + ?Sized>(
        bank: &QuestionBank,
        click_history: &[usize],
        session_id: impl Into<String>,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let questions = create_session_question_set(bank, click_history, rng)?;
        Ok(Self {
            session_id: session_id.into(),
            questions,
            responses: BTreeMap::new(),
            click_pattern: Vec::new(),
            distribution: Distribution::default(),
            tally: ScoreTally::default(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn questions(&self) -> &SessionQuestionSet {
        &self.questions
    }

    pub fn responses(&self) -> &BTreeMap<usize, AnswerRecord> {
        &self.responses
    }

    pub fn click_pattern(&self) -> &[usize] {
        &self.click_pattern
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answered() >= self.total_questions()
    }

    /// The next question to show, with its index in the session set.
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        let index = self.answered();
        self.questions.get(index).map(|q| (index, q))
    }

    /// Applies the user's pick for the current question.
    ///
    /// Answers must arrive in presentation order. When the click pattern
    /// turns repetitive, the unanswered questions are re-ordered; answered
    /// ones are never touched.
    pub fn answer<R: Rng + ?Sized>(
        mut self,
        question_index: usize,
        option_id: i64,
        rng: &mut R,
    ) -> Result<AnswerOutcome, EngineError> {
        let (expected, question) = self.current_question().ok_or(EngineError::AttemptComplete)?;
        if question_index != expected {
            return Err(EngineError::UnexpectedQuestion {
                expected,
                got: question_index,
            });
        }

        let (position, option) = question.option(option_id).ok_or(EngineError::UnknownOption {
            question_index,
            option_id,
        })?;
        let record = AnswerRecord {
            question_index,
            selected_option: option.clone(),
            prompt_text: question.prompt.clone(),
        };

        self.tally = record_answer(self.tally, &record);
        self.distribution = self.distribution.with_pick(record.selected_option.archetype);
        self.click_pattern.push(position);
        self.responses.insert(question_index, record);

        let next = question_index + 1;
        let mut regenerated = false;
        if let Some(dominant) = dominant_position(&self.click_pattern) {
            if next < self.questions.len() {
                tracing::info!(
                    "Repetitive clicking on position {} in session {}, re-ordering {} remaining questions",
                    dominant,
                    self.session_id,
                    self.questions.len() - next
                );
                let suffix = debias_remaining(
                    &self.questions.questions()[next..],
                    &self.distribution,
                    dominant,
                    rng,
                );
                self.questions = self.questions.with_suffix(next, suffix);
                regenerated = true;
            }
        }

        Ok(AnswerOutcome {
            state: self,
            regenerated,
        })
    }

    /// Resolves a completed attempt into the payload to persist.
    pub fn finish(self, completed_at: DateTime<Utc>) -> Result<QuizSubmission, EngineError> {
        if !self.is_complete() {
            return Err(EngineError::IncompleteAttempt {
                answered: self.answered(),
                total: self.total_questions(),
            });
        }

        let scores = tally_answers(self.responses.values());
        let resolution = resolve(&scores)?;

        tracing::info!(
            "Session {} resolved to {} with {} points",
            self.session_id,
            resolution.archetype,
            resolution.score
        );

        Ok(QuizSubmission {
            archetype: resolution.archetype,
            score: resolution.score,
            answers: QuizAnswers {
                total_questions: self.total_questions(),
                responses: self.responses,
                scores,
                completed_at,
            },
            session_id: self.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn start(seed: u64) -> (QuizAttemptState, Mcg128Xsl64) {
        let mut rng = Mcg128Xsl64::seed_from_u64(seed);
        let state = QuizAttemptState::start(&QuestionBank::standard(), &[], "session", &mut rng).unwrap();
        (state, rng)
    }

    /// Option id at a given on-screen position of the current question.
    fn option_at(state: &QuizAttemptState, position: usize) -> (usize, i64) {
        let (index, question) = state.current_question().unwrap();
        (index, question.options[position].id)
    }

    #[test]
    fn test_answer_advances_and_tallies() {
        let (state, mut rng) = start(1);
        let (index, question) = state.current_question().unwrap();
        let picked = question.options[2].clone();

        let outcome = state.answer(index, picked.id, &mut rng).unwrap();
        let state = outcome.state;

        assert!(!outcome.regenerated);
        assert_eq!(state.answered(), 1);
        assert_eq!(state.click_pattern(), &[2]);
        assert_eq!(state.tally().get(picked.archetype), picked.points);
        assert_eq!(state.distribution().count(picked.archetype), 1);
        assert_eq!(state.responses()[&0].selected_option, picked);
    }

    #[test]
    fn test_out_of_order_answer_is_rejected() {
        let (state, mut rng) = start(2);
        let (_, option_id) = option_at(&state, 0);

        let err = state.answer(3, option_id, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::UnexpectedQuestion { expected: 0, got: 3 }));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let (state, mut rng) = start(3);
        let err = state.answer(0, 99, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::UnknownOption { option_id: 99, .. }));
    }

    #[test]
    fn test_same_position_triggers_regeneration_on_fourth_answer() {
        let (mut state, mut rng) = start(4);
        let mut fired = Vec::new();

        for _ in 0..4 {
            let (index, option_id) = option_at(&state, 0);
            let answered_before: Vec<Question> = state.questions().questions()[..=index].to_vec();

            let outcome = state.answer(index, option_id, &mut rng).unwrap();
            fired.push(outcome.regenerated);
            state = outcome.state;

            // Answered questions are never re-ordered.
            assert_eq!(&state.questions().questions()[..=index], answered_before.as_slice());
        }

        assert_eq!(fired, vec![false, false, false, true]);
    }

    #[test]
    fn test_finish_requires_every_answer() {
        let (state, mut rng) = start(5);
        let (index, option_id) = option_at(&state, 1);
        let state = state.answer(index, option_id, &mut rng).unwrap().state;

        let err = state.finish(Utc::now()).unwrap_err();
        assert!(matches!(err, EngineError::IncompleteAttempt { answered: 1, total: 15 }));
    }

    #[test]
    fn test_full_attempt_produces_submission() {
        let (mut state, mut rng) = start(6);
        for i in 0..15 {
            let (index, option_id) = option_at(&state, i % 4);
            state = state.answer(index, option_id, &mut rng).unwrap().state;
        }
        assert!(state.is_complete());

        let expected_tally = *state.tally();
        assert!(matches!(
            state.clone().answer(15, 1, &mut rng),
            Err(EngineError::AttemptComplete)
        ));

        let submission = state.finish(Utc::now()).unwrap();
        assert_eq!(submission.answers.total_questions, 15);
        assert_eq!(submission.answers.responses.len(), 15);
        assert_eq!(submission.answers.scores, expected_tally);
        assert_eq!(submission.score, expected_tally.get(submission.archetype));
        assert_eq!(submission.session_id, "session");
    }
}
