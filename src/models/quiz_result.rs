// src/models/quiz_result.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, types::Json};

use crate::engine::{Archetype, EngineError, Progress, ProgressFlags, QuizAnswers};

/// Represents the 'quiz_results' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct QuizResultRow {
    pub id: i64,
    pub user_id: i64,
    pub archetype: String,
    pub score: i64,
    /// Stored as a JSON document.
    pub answers: Json<QuizAnswers>,
    pub session_id: Option<String>,
    pub has_viewed_results: bool,
    pub has_watched_film: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A completed attempt as returned to its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub archetype: Archetype,
    pub score: i64,
    pub answers: QuizAnswers,
    pub session_id: Option<String>,
    pub has_viewed_results: bool,
    pub has_watched_film: bool,
    pub progress: Progress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn flags(&self) -> ProgressFlags {
        ProgressFlags {
            has_viewed_results: self.has_viewed_results,
            has_watched_film: self.has_watched_film,
        }
    }
}

/// Rows carrying an archetype outside the fixed set are rejected.
impl TryFrom<QuizResultRow> for QuizResult {
    type Error = EngineError;

    fn try_from(row: QuizResultRow) -> Result<Self, Self::Error> {
        let archetype = row.archetype.parse::<Archetype>()?;
        let flags = ProgressFlags {
            has_viewed_results: row.has_viewed_results,
            has_watched_film: row.has_watched_film,
        };

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            archetype,
            score: row.score,
            answers: row.answers.0,
            session_id: row.session_id,
            has_viewed_results: row.has_viewed_results,
            has_watched_film: row.has_watched_film,
            progress: flags.progress(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
