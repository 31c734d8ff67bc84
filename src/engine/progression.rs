// src/engine/progression.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Post-quiz engagement stage of one quiz result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Progress {
    Submitted,
    ResultsViewed,
    FilmWatched,
}

/// The two one-way flags stored on a quiz result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressFlags {
    pub has_viewed_results: bool,
    pub has_watched_film: bool,
}

/// A partial update of the progress flags, as sent by the client and as
/// handed to persistence. Absent fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_viewed_results: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_watched_film: Option<bool>,
}

/// Outcome of a progression request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Something changed: persist `patch`, after which the result is at `to`.
    Advance { to: Progress, patch: ProgressUpdate },
    /// Nothing to persist.
    Unchanged(Progress),
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        matches!(self, Transition::Unchanged(_))
    }
}

/// A progression request that is ignored rather than applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("results-viewed flag cannot be cleared")]
    ClearResultsViewed,
    #[error("film-watched flag cannot be cleared")]
    ClearFilmWatched,
}

impl ProgressFlags {
    pub fn progress(&self) -> Progress {
        if self.has_watched_film {
            Progress::FilmWatched
        } else if self.has_viewed_results {
            Progress::ResultsViewed
        } else {
            Progress::Submitted
        }
    }

    /// Valid only from `Submitted`; a no-op once the result has moved past it.
    pub fn mark_results_viewed(self) -> Transition {
        match self.progress() {
            Progress::Submitted => Transition::Advance {
                to: Progress::ResultsViewed,
                patch: ProgressUpdate {
                    has_viewed_results: Some(true),
                    has_watched_film: None,
                },
            },
            current => Transition::Unchanged(current),
        }
    }

    /// Valid from `Submitted` or `ResultsViewed`.
    pub fn mark_film_watched(self) -> Transition {
        match self.progress() {
            Progress::FilmWatched => Transition::Unchanged(Progress::FilmWatched),
            _ => Transition::Advance {
                to: Progress::FilmWatched,
                patch: ProgressUpdate {
                    has_viewed_results: None,
                    has_watched_film: Some(true),
                },
            },
        }
    }

    /// Applies a client update. Requests to clear a flag are logged and ignored.
    pub fn apply(self, update: &ProgressUpdate) -> Transition {
        for err in update.reverts() {
            tracing::warn!("Ignoring progression request: {}", err);
        }

        let mut patch = ProgressUpdate::default();
        if update.has_viewed_results == Some(true) {
            if let Transition::Advance { patch: p, .. } = self.mark_results_viewed() {
                patch.has_viewed_results = p.has_viewed_results;
            }
        }
        if update.has_watched_film == Some(true) {
            if let Transition::Advance { patch: p, .. } = self.mark_film_watched() {
                patch.has_watched_film = p.has_watched_film;
            }
        }

        if patch == ProgressUpdate::default() {
            Transition::Unchanged(self.progress())
        } else {
            Transition::Advance {
                to: self.with_patch(&patch).progress(),
                patch,
            }
        }
    }

    /// Flags after persisting `patch`. Flags only ever go from false to true.
    pub fn with_patch(self, patch: &ProgressUpdate) -> Self {
        Self {
            has_viewed_results: self.has_viewed_results || patch.has_viewed_results == Some(true),
            has_watched_film: self.has_watched_film || patch.has_watched_film == Some(true),
        }
    }
}

impl ProgressUpdate {
    /// The parts of this update that try to clear a flag.
    pub fn reverts(&self) -> impl Iterator<Item = TransitionError> {
        let viewed = (self.has_viewed_results == Some(false)).then_some(TransitionError::ClearResultsViewed);
        let watched = (self.has_watched_film == Some(false)).then_some(TransitionError::ClearFilmWatched);
        viewed.into_iter().chain(watched)
    }
}
