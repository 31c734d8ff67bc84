// src/engine/scoring.rs

use serde::{Deserialize, Serialize};

use super::{
    archetype::{Archetype, ScoreTally},
    bank::QuizOption,
    error::EngineError,
};

/// One answered question, with the prompt copied in for history display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_option: QuizOption,
    pub prompt_text: String,
}

/// The winning archetype and its point total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub archetype: Archetype,
    pub score: i64,
}

/// Folds one answer into the tally: the selected option's points go to its archetype.
pub fn record_answer(tally: ScoreTally, answer: &AnswerRecord) -> ScoreTally {
    let option = &answer.selected_option;
    tally.with_points(option.archetype, option.points)
}

/// Tallies a sequence of answers from scratch.
pub fn tally_answers<'a, I>(answers: I) -> ScoreTally
where
    I: IntoIterator<Item = &'a AnswerRecord>,
{
    answers.into_iter().fold(ScoreTally::default(), record_answer)
}

/// Picks the archetype with the highest total.
///
/// Ties go to the archetype declared first (Avoider, Gambler, Realist,
/// Architect). A tally with no points recorded cannot be resolved.
pub fn resolve(tally: &ScoreTally) -> Result<Resolution, EngineError> {
    if tally.is_empty() {
        return Err(EngineError::EmptyTally);
    }

    let mut best = Resolution {
        archetype: Archetype::Avoider,
        score: tally.get(Archetype::Avoider),
    };
    for (archetype, score) in tally.iter().skip(1) {
        if score > best.score {
            best = Resolution { archetype, score };
        }
    }
    Ok(best)
}
