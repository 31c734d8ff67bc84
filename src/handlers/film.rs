// src/handlers/film.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::{Config, FILM_TITLE},
    error::AppError,
    utils::jwt::Claims,
};

/// Returns the film stream once the user has completed the quiz at least once.
pub async fn film_access(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let completed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_results WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await?;

    if completed == 0 {
        return Err(AppError::Forbidden(
            "Complete the quiz to unlock the film".to_string(),
        ));
    }

    Ok(Json(json!({
        "title": FILM_TITLE,
        "url": config.film_url.as_str(),
    })))
}
