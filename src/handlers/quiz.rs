// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use sqlx::{SqlitePool, types::Json as SqlJson};
use uuid::Uuid;

use crate::{
    engine::{ProgressUpdate, QuestionBank, QuizAttemptState, QuizSubmission, Transition},
    error::AppError,
    models::{
        quiz::{AnswerRequest, AnswerResponse, PublicQuestion, StartQuizRequest, StartQuizResponse},
        quiz_result::{QuizResult, QuizResultRow},
    },
    state::AttemptStore,
    utils::jwt::Claims,
};

const RESULT_COLUMNS: &str = "id, user_id, archetype, score, answers, session_id, \
     has_viewed_results, has_watched_film, created_at, updated_at";

fn into_result(row: QuizResultRow) -> Result<QuizResult, AppError> {
    let id = row.id;
    QuizResult::try_from(row).map_err(|e| {
        AppError::InternalServerError(format!("Quiz result {} is corrupt: {}", id, e))
    })
}

/// Fetches a result owned by `user_id`. Other users' results read as missing.
async fn fetch_owned_result(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> Result<QuizResult, AppError> {
    let row = sqlx::query_as::<_, QuizResultRow>(&format!(
        "SELECT {} FROM quiz_results WHERE id = ? AND user_id = ?",
        RESULT_COLUMNS
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Quiz result not found".to_string()))?;

    into_result(row)
}

/// Stores a finished attempt as a new quiz result.
async fn insert_result(
    pool: &SqlitePool,
    user_id: i64,
    submission: &QuizSubmission,
) -> Result<QuizResult, AppError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, QuizResultRow>(&format!(
        r#"
        INSERT INTO quiz_results (user_id, archetype, score, answers, session_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        RESULT_COLUMNS
    ))
    .bind(user_id)
    .bind(submission.archetype.as_str())
    .bind(submission.score)
    .bind(SqlJson(&submission.answers))
    .bind(&submission.session_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert quiz result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    into_result(row)
}

/// Starts a quiz attempt.
///
/// * Builds a randomized question set (harder shuffling if `clickHistory` is repetitive).
/// * Keeps the attempt in memory, abandoning the user's previous unfinished one.
/// * Returns the session id and the first question without scoring data.
pub async fn start_quiz(
    State(bank): State<Arc<QuestionBank>>,
    State(attempts): State<AttemptStore>,
    Extension(claims): Extension<Claims>,
    req: Option<Json<StartQuizRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let session_id = Uuid::new_v4().to_string();

    let state = QuizAttemptState::start(
        &bank,
        req.recent_clicks(),
        session_id.clone(),
        &mut StdRng::from_entropy(),
    )?;

    let response = StartQuizResponse {
        session_id: session_id.clone(),
        total_questions: state.total_questions(),
        question: PublicQuestion::current(&state),
    };

    let abandoned = attempts.begin(user_id, state);
    if abandoned > 0 {
        tracing::info!("User {} abandoned {} unfinished attempt(s)", user_id, abandoned);
    }
    tracing::info!("User {} started quiz session {}", user_id, session_id);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Records one answer for an attempt.
///
/// Returns the next question, or on the last answer resolves the archetype,
/// persists the quiz result and returns it. An attempt that fails to resolve
/// is discarded without being persisted; one whose result fails to store is
/// kept so the last answer can be sent again.
pub async fn answer_question(
    State(pool): State<SqlitePool>,
    State(attempts): State<AttemptStore>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let state = attempts
        .get(&session_id, user_id)
        .ok_or(AppError::NotFound("Quiz session not found".to_string()))?;

    let outcome = state.answer(req.question_index, req.option_id, &mut StdRng::from_entropy())?;
    let state = outcome.state;

    if !state.is_complete() {
        let response = AnswerResponse::InProgress {
            answered: state.answered(),
            total_questions: state.total_questions(),
            regenerated: outcome.regenerated,
            question: PublicQuestion::current(&state),
        };
        attempts.update(user_id, state);
        return Ok(Json(response));
    }

    let submission = match state.finish(Utc::now()) {
        Ok(submission) => submission,
        Err(e) => {
            attempts.remove(&session_id);
            return Err(e.into());
        }
    };
    // Dropped only once stored; until then the attempt still expects its last answer.
    let result = insert_result(&pool, user_id, &submission).await?;
    attempts.remove(&session_id);

    tracing::info!(
        "User {} completed quiz session {} as {} (result {})",
        user_id,
        session_id,
        result.archetype,
        result.id
    );

    Ok(Json(AnswerResponse::Completed { result }))
}

/// Lists the current user's quiz results, newest first.
pub async fn list_results(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let rows = sqlx::query_as::<_, QuizResultRow>(&format!(
        "SELECT {} FROM quiz_results WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        RESULT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz results: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let results = rows
        .into_iter()
        .map(into_result)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(results))
}

/// Retrieves one of the current user's quiz results.
pub async fn get_result(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = fetch_owned_result(&pool, id, claims.user_id()?).await?;
    Ok(Json(result))
}

/// Marks a result as viewed and/or its film as watched.
///
/// Flags only move from false to true. A request that changes nothing
/// (repeat, or an attempt to clear a flag) writes nothing and returns the
/// stored result unchanged.
pub async fn update_result(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(update): Json<ProgressUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let current = fetch_owned_result(&pool, id, user_id).await?;

    let (to, patch) = match current.flags().apply(&update) {
        Transition::Unchanged(_) => return Ok(Json(current)),
        Transition::Advance { to, patch } => (to, patch),
    };

    // OR keeps the write monotonic even if another request advanced the row meanwhile.
    let row = sqlx::query_as::<_, QuizResultRow>(&format!(
        r#"
        UPDATE quiz_results SET
            has_viewed_results = (has_viewed_results OR ?),
            has_watched_film = (has_watched_film OR ?),
            updated_at = ?
        WHERE id = ? AND user_id = ?
        RETURNING {}
        "#,
        RESULT_COLUMNS
    ))
    .bind(patch.has_viewed_results.unwrap_or(false))
    .bind(patch.has_watched_film.unwrap_or(false))
    .bind(Utc::now())
    .bind(id)
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Quiz result not found".to_string()))?;

    tracing::info!("Quiz result {} advanced to {:?}", id, to);

    Ok(Json(into_result(row)?))
}
