// tests/engine_tests.rs

use archetype_quiz::engine::{
    AnswerRecord, Archetype, QuestionBank, QuizAttemptState, ScoreTally, record_answer, resolve,
};
use chrono::Utc;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

/// Answer record picking the canonical option of `archetype` for bank question `i`.
fn canonical_answer(bank: &QuestionBank, i: usize, archetype: Archetype) -> AnswerRecord {
    let question = &bank.questions()[i];
    let option = question
        .options
        .iter()
        .find(|o| o.archetype == archetype)
        .expect("every question covers every archetype");

    AnswerRecord {
        question_index: i,
        selected_option: option.clone(),
        prompt_text: question.prompt.clone(),
    }
}

#[test]
fn fifteen_answers_resolve_to_realist() {
    let bank = QuestionBank::standard();
    let plan = [
        (Archetype::Avoider, 3),
        (Archetype::Gambler, 2),
        (Archetype::Realist, 6),
        (Archetype::Architect, 4),
    ];

    let picks: Vec<Archetype> = plan
        .iter()
        .flat_map(|&(archetype, n)| std::iter::repeat_n(archetype, n))
        .collect();
    assert_eq!(picks.len(), 15);

    let tally = picks
        .iter()
        .enumerate()
        .map(|(i, &archetype)| canonical_answer(&bank, i, archetype))
        .fold(ScoreTally::default(), |tally, answer| record_answer(tally, &answer));

    assert_eq!(
        tally,
        ScoreTally {
            avoider: 9,
            gambler: 6,
            realist: 18,
            architect: 12,
        }
    );

    let resolution = resolve(&tally).unwrap();
    assert_eq!(resolution.archetype, Archetype::Realist);
    assert_eq!(resolution.score, 18);
}

#[test]
fn every_bank_question_covers_the_four_archetypes() {
    for question in QuestionBank::standard().questions() {
        for archetype in Archetype::ALL {
            let matching = question
                .options
                .iter()
                .filter(|o| o.archetype == archetype)
                .count();
            assert_eq!(matching, 1, "question {} / {}", question.id, archetype);
        }
    }
}

#[test]
fn attempt_tally_matches_selected_points() {
    // Whatever the randomizer does to points, the stored tally is the sum of what was picked.
    for seed in 0..20 {
        let mut rng = Mcg128Xsl64::seed_from_u64(seed);
        let mut state =
            QuizAttemptState::start(&QuestionBank::standard(), &[], format!("s{}", seed), &mut rng)
                .unwrap();

        while let Some((index, question)) = state.current_question() {
            let position = (index * 7 + seed as usize) % question.options.len();
            let option_id = question.options[position].id;
            state = state.answer(index, option_id, &mut rng).unwrap().state;
        }

        let submission = state.finish(Utc::now()).unwrap();
        for archetype in Archetype::ALL {
            let expected: i64 = submission
                .answers
                .responses
                .values()
                .filter(|r| r.selected_option.archetype == archetype)
                .map(|r| r.selected_option.points)
                .sum();
            assert_eq!(submission.answers.scores.get(archetype), expected);
        }
        assert!(submission.answers.responses.values().all(|r| r.selected_option.points >= 1));
        assert_eq!(submission.score, submission.answers.scores.get(submission.archetype));
    }
}

#[test]
fn position_zero_clicker_triggers_countermeasure_from_fourth_answer() {
    let mut rng = Mcg128Xsl64::seed_from_u64(2024);
    let mut state = QuizAttemptState::start(&QuestionBank::standard(), &[], "s", &mut rng).unwrap();
    let mut regenerated = Vec::new();

    while let Some((index, question)) = state.current_question() {
        let option_id = question.options[0].id;
        let outcome = state.answer(index, option_id, &mut rng).unwrap();
        regenerated.push(outcome.regenerated);
        state = outcome.state;
    }

    assert_eq!(&regenerated[..4], &[false, false, false, true]);
    // Nothing left to re-order after the last answer.
    assert_eq!(regenerated.last(), Some(&false));
}
