// src/engine/mod.rs

//! The quiz engine: question bank, presentation randomizer, scoring,
//! anti-repetition monitor, archetype resolution and progression tracking.
//!
//! Everything here is synchronous and free of I/O. Randomness is passed in
//! as an `rand::Rng` so callers and tests control it.

pub mod archetype;
pub mod attempt;
pub mod bank;
pub mod error;
pub mod monitor;
pub mod progression;
pub mod randomizer;
pub mod scoring;

pub use archetype::{Archetype, ScoreTally};
pub use attempt::{AnswerOutcome, QuizAnswers, QuizAttemptState, QuizSubmission};
pub use bank::{Question, QuestionBank, QuizOption};
pub use error::{EngineError, ErrorKind};
pub use progression::{Progress, ProgressFlags, ProgressUpdate, Transition};
pub use scoring::{AnswerRecord, Resolution, record_answer, resolve};
