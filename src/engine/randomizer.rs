// src/engine/randomizer.rs

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

use super::{
    bank::{MAX_POINTS, Question, QuestionBank},
    error::EngineError,
};

/// Number of most recent clicks inspected for repetition.
pub const REPETITION_WINDOW: usize = 4;
/// Clicks on one position within the window that mark the pattern as repetitive.
pub const REPETITION_THRESHOLD: usize = 3;

/// Chance of swapping the first two options when countering a repetitive clicker.
const SWAP_PROBABILITY: f64 = 0.4;
/// Chance that a question's option points are nudged by one.
const PERTURB_PROBABILITY: f64 = 0.1;

/// Returns the on-screen position the user keeps clicking, if any.
///
/// A click pattern is repetitive when one position occurs at least
/// `REPETITION_THRESHOLD` times among the last `REPETITION_WINDOW` clicks.
pub fn dominant_position(clicks: &[usize]) -> Option<usize> {
    if clicks.len() < REPETITION_WINDOW {
        return None;
    }
    let window = &clicks[clicks.len() - REPETITION_WINDOW..];
    window
        .iter()
        .copied()
        .find(|&pos| window.iter().filter(|&&other| other == pos).count() >= REPETITION_THRESHOLD)
}

/// The per-attempt, display-ordered copy of the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionQuestionSet {
    questions: Vec<Question>,
}

impl SessionQuestionSet {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Replaces every question from `from` onwards, keeping the answered prefix.
    pub(crate) fn with_suffix(mut self, from: usize, suffix: Vec<Question>) -> Self {
        self.questions.truncate(from);
        self.questions.extend(suffix);
        self
    }
}

/// Builds the question sequence for a new attempt.
///
/// Options are shuffled per question (twice, plus a possible swap of the
/// first two, when `click_history` is repetitive), points are occasionally
/// nudged by one to make ties rarer, and the question order is shuffled.
/// Option categories are never changed and the bank itself is untouched.
pub fn create_session_question_set<R: Rng + ?Sized>(
    bank: &QuestionBank,
    click_history: &[usize],
    rng: &mut R,
) -> Result<SessionQuestionSet, EngineError> {
    if bank.is_empty() {
        return Err(EngineError::EmptyQuestionBank);
    }

    let repetitive = dominant_position(click_history).is_some();
    if repetitive {
        tracing::debug!("Repetitive click history at quiz start, shuffling options harder");
    }

    let mut questions: Vec<Question> = bank
        .questions()
        .iter()
        .map(|q| present_question(q, repetitive, rng))
        .collect();
    questions.shuffle(rng);

    Ok(SessionQuestionSet { questions })
}

fn present_question<R: Rng + ?Sized>(question: &Question, repetitive: bool, rng: &mut R) -> Question {
    let mut presented = question.clone();
    presented.options.shuffle(rng);

    if repetitive {
        presented.options.shuffle(rng);
        if presented.options.len() > 1 && rng.gen_bool(SWAP_PROBABILITY) {
            presented.options.swap(0, 1);
        }
    }

    if rng.gen_bool(PERTURB_PROBABILITY) {
        for option in &mut presented.options {
            let delta = if rng.gen_bool(0.5) { 1 } else { -1 };
            option.points = (option.points + delta).clamp(1, MAX_POINTS);
        }
    }

    presented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::archetype::Archetype;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn sorted_archetypes(question: &Question) -> Vec<Archetype> {
        let mut archetypes: Vec<Archetype> = question.options.iter().map(|o| o.archetype).collect();
        archetypes.sort();
        archetypes
    }

    #[test]
    fn test_dominant_position_needs_four_clicks() {
        assert_eq!(dominant_position(&[]), None);
        assert_eq!(dominant_position(&[0, 0, 0]), None);
        assert_eq!(dominant_position(&[0, 0, 0, 0]), Some(0));
        assert_eq!(dominant_position(&[2, 1, 2, 2]), Some(2));
        assert_eq!(dominant_position(&[1, 0, 0, 1]), None);
        // Only the last four clicks count.
        assert_eq!(dominant_position(&[3, 3, 3, 0, 1, 2, 0]), None);
    }

    #[test]
    fn test_session_set_preserves_categories_and_ids() {
        let bank = QuestionBank::standard();
        let mut rng = Mcg128Xsl64::seed_from_u64(7);

        for history in [Vec::<usize>::new(), vec![1, 1, 1, 1]] {
            let set = create_session_question_set(&bank, &history, &mut rng).unwrap();
            assert_eq!(set.len(), bank.len());

            for presented in set.questions() {
                let canonical = bank
                    .questions()
                    .iter()
                    .find(|q| q.id == presented.id)
                    .unwrap();
                assert_eq!(presented.prompt, canonical.prompt);
                assert_eq!(sorted_archetypes(presented), sorted_archetypes(canonical));
                for option in &presented.options {
                    let (_, original) = canonical.option(option.id).unwrap();
                    assert_eq!(option.archetype, original.archetype);
                    assert_eq!(option.text, original.text);
                }
            }
        }
    }

    #[test]
    fn test_perturbed_points_never_drop_below_one() {
        let questions = QuestionBank::standard()
            .questions()
            .iter()
            .cloned()
            .map(|mut q| {
                q.options.iter_mut().for_each(|o| o.points = 1);
                q
            })
            .collect();
        let bank = QuestionBank::new(questions).unwrap();
        let mut rng = Mcg128Xsl64::seed_from_u64(42);

        let mut perturbed = 0;
        for _ in 0..200 {
            let set = create_session_question_set(&bank, &[], &mut rng).unwrap();
            for option in set.questions().iter().flat_map(|q| &q.options) {
                assert!(option.points >= 1);
                assert!(option.points <= 2);
                if option.points == 2 {
                    perturbed += 1;
                }
            }
        }
        assert!(perturbed > 0, "perturbation should fire at least once in 3000 questions");
    }

    #[test]
    fn test_perturbation_stays_below_max_points() {
        let questions = QuestionBank::standard()
            .questions()
            .iter()
            .cloned()
            .map(|mut q| {
                q.options.iter_mut().for_each(|o| o.points = MAX_POINTS);
                q
            })
            .collect();
        let bank = QuestionBank::new(questions).unwrap();
        let mut rng = Mcg128Xsl64::seed_from_u64(8);

        let mut lowered = 0;
        for _ in 0..200 {
            let set = create_session_question_set(&bank, &[], &mut rng).unwrap();
            for option in set.questions().iter().flat_map(|q| &q.options) {
                assert!(option.points <= MAX_POINTS);
                if option.points < MAX_POINTS {
                    lowered += 1;
                }
            }
        }
        assert!(lowered > 0);
    }

    #[test]
    fn test_bank_is_not_mutated() {
        let bank = QuestionBank::standard();
        let before = bank.questions().to_vec();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);

        for _ in 0..50 {
            create_session_question_set(&bank, &[0, 0, 0, 0], &mut rng).unwrap();
        }
        assert_eq!(bank.questions(), before.as_slice());
    }

    #[test]
    fn test_same_seed_gives_same_set() {
        let bank = QuestionBank::standard();
        let a = create_session_question_set(&bank, &[], &mut Mcg128Xsl64::seed_from_u64(99)).unwrap();
        let b = create_session_question_set(&bank, &[], &mut Mcg128Xsl64::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_suffix_keeps_prefix() {
        let bank = QuestionBank::standard();
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        let set = create_session_question_set(&bank, &[], &mut rng).unwrap();
        let prefix: Vec<Question> = set.questions()[..5].to_vec();
        let suffix: Vec<Question> = set.questions()[5..].iter().rev().cloned().collect();

        let replaced = set.with_suffix(5, suffix.clone());
        assert_eq!(&replaced.questions()[..5], prefix.as_slice());
        assert_eq!(&replaced.questions()[5..], suffix.as_slice());
    }
}
