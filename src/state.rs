// src/state.rs

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    engine::{QuestionBank, QuizAttemptState},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub bank: Arc<QuestionBank>,
    pub attempts: AttemptStore,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<QuestionBank> {
    fn from_ref(state: &AppState) -> Self {
        state.bank.clone()
    }
}

impl FromRef<AppState> for AttemptStore {
    fn from_ref(state: &AppState) -> Self {
        state.attempts.clone()
    }
}

#[derive(Debug, Clone)]
struct PendingAttempt {
    user_id: i64,
    state: QuizAttemptState,
}

/// In-progress quiz attempts, keyed by session id.
///
/// Attempts live only in memory; a restart abandons them. Each user has at
/// most one pending attempt.
#[derive(Debug, Clone, Default)]
pub struct AttemptStore {
    inner: Arc<Mutex<HashMap<String, PendingAttempt>>>,
}

impl AttemptStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingAttempt>> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a new attempt, abandoning any earlier pending attempt of the same user.
    /// Returns how many attempts were abandoned.
    pub fn begin(&self, user_id: i64, state: QuizAttemptState) -> usize {
        let mut attempts = self.lock();
        let before = attempts.len();
        attempts.retain(|_, pending| pending.user_id != user_id);
        let abandoned = before - attempts.len();
        attempts.insert(
            state.session_id().to_string(),
            PendingAttempt { user_id, state },
        );
        abandoned
    }

    /// A copy of the user's attempt, if it exists and belongs to them.
    pub fn get(&self, session_id: &str, user_id: i64) -> Option<QuizAttemptState> {
        self.lock()
            .get(session_id)
            .filter(|pending| pending.user_id == user_id)
            .map(|pending| pending.state.clone())
    }

    /// Stores the next state of an attempt that is still pending.
    pub fn update(&self, user_id: i64, state: QuizAttemptState) {
        let mut attempts = self.lock();
        if let Some(pending) = attempts.get_mut(state.session_id()) {
            if pending.user_id == user_id {
                pending.state = state;
            }
        }
    }

    pub fn remove(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
