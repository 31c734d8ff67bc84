// src/engine/monitor.rs

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

use super::{archetype::Archetype, bank::Question};

/// How many times each archetype has been picked so far in an attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    counts: [u32; 4],
}

impl Distribution {
    pub fn with_pick(mut self, archetype: Archetype) -> Self {
        self.counts[archetype.index()] += 1;
        self
    }

    pub fn count(&self, archetype: Archetype) -> u32 {
        self.counts[archetype.index()]
    }
}

/// Re-orders the options of the not-yet-answered questions for a user who
/// keeps clicking `dominant_position`.
///
/// Each question is shuffled, then the least-picked archetype so far is
/// swapped into the dominant slot. Ties among least-picked archetypes fall
/// to whichever the shuffle put first, so the result stays unpredictable.
pub fn debias_remaining<R: Rng + ?Sized>(
    remaining: &[Question],
    distribution: &Distribution,
    dominant_position: usize,
    rng: &mut R,
) -> Vec<Question> {
    remaining
        .iter()
        .map(|question| {
            let mut question = question.clone();
            question.options.shuffle(rng);

            if dominant_position < question.options.len() {
                let least_picked = question
                    .options
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, opt)| distribution.count(opt.archetype))
                    .map(|(i, _)| i);
                if let Some(i) = least_picked {
                    question.options.swap(i, dominant_position);
                }
            }
            question
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bank::QuestionBank;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn test_distribution_counts_picks() {
        let distribution = Distribution::default()
            .with_pick(Archetype::Gambler)
            .with_pick(Archetype::Gambler)
            .with_pick(Archetype::Architect);

        assert_eq!(distribution.count(Archetype::Gambler), 2);
        assert_eq!(distribution.count(Archetype::Architect), 1);
        assert_eq!(distribution.count(Archetype::Avoider), 0);
    }

    #[test]
    fn test_most_picked_archetype_leaves_dominant_slot() {
        let bank = QuestionBank::standard();
        let distribution = Distribution::default()
            .with_pick(Archetype::Realist)
            .with_pick(Archetype::Realist)
            .with_pick(Archetype::Realist)
            .with_pick(Archetype::Gambler);
        let mut rng = Mcg128Xsl64::seed_from_u64(11);

        for position in 0..4 {
            let regenerated = debias_remaining(bank.questions(), &distribution, position, &mut rng);
            assert_eq!(regenerated.len(), bank.len());

            for question in &regenerated {
                let at_slot = question.options[position].archetype;
                assert_ne!(at_slot, Archetype::Realist);
                assert_ne!(at_slot, Archetype::Gambler);
            }
        }
    }

    #[test]
    fn test_regeneration_keeps_question_content() {
        let bank = QuestionBank::standard();
        let distribution = Distribution::default().with_pick(Archetype::Avoider);
        let mut rng = Mcg128Xsl64::seed_from_u64(5);

        let regenerated = debias_remaining(&bank.questions()[3..], &distribution, 2, &mut rng);

        for (before, after) in bank.questions()[3..].iter().zip(&regenerated) {
            assert_eq!(before.id, after.id);
            let mut a = before.options.clone();
            let mut b = after.options.clone();
            a.sort_by_key(|o| o.id);
            b.sort_by_key(|o| o.id);
            assert_eq!(a, b);
        }
    }
}
