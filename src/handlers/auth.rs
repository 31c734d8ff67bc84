// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::{Config, SESSION_COOKIE},
    error::AppError,
    models::user::{PublicUser, SignInRequest, SignUpRequest, UpdateProfileRequest, User},
    utils::{
        cookie::{clear_cookie, session_cookie},
        hash::{hash_password, verify_password},
        html::{sanitize_optional, sanitize_text},
        jwt::{Claims, sign_jwt},
    },
};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, zip_code, \
     occupation_status, created_at, updated_at";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))
}

/// Registers a new account.
///
/// Hashes the password using Argon2 and strips markup from the name fields.
/// Returns 201 Created and the user (excluding the password hash).
pub async fn signup(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let email = normalize_email(&payload.email);
    let hashed_password = hash_password(&payload.password)?;
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, first_name, last_name, zip_code, occupation_status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(&email)
    .bind(&hashed_password)
    .bind(sanitize_text(&payload.first_name))
    .bind(sanitize_text(&payload.last_name))
    .bind(payload.zip_code.as_deref().map(str::trim))
    .bind(sanitize_optional(payload.occupation_status.as_deref()))
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            AppError::Conflict("User already exists".to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    tracing::info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

/// Authenticates a user.
///
/// On success, sets the HttpOnly session cookie and also returns the token
/// for clients that prefer the Authorization header.
pub async fn signin(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    Json(payload): Json<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let invalid = || AppError::AuthError("Invalid email or password".to_string());

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(normalize_email(&payload.email))
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Sign-in DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;
    let cookie = session_cookie(
        SESSION_COOKIE,
        &token,
        config.jwt_expiration,
        config.cookie_secure,
    );

    Ok((
        jar.add(cookie),
        Json(json!({
            "user": PublicUser::from(user),
            "token": token,
            "type": "Bearer",
        })),
    ))
}

/// Clears the session cookie.
pub async fn signout(
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    tracing::debug!("User {} signed out", user_id);

    Ok((
        jar.add(clear_cookie(SESSION_COOKIE, config.cookie_secure)),
        Json(json!({ "message": "Signed out successfully" })),
    ))
}

/// Returns the current user's profile.
pub async fn me(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = find_user(&pool, claims.user_id()?).await?;
    Ok(Json(PublicUser::from(user)))
}

/// Partially updates the current user's profile.
pub async fn update_me(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let user_id = claims.user_id()?;

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users SET
            first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            zip_code = COALESCE(?, zip_code),
            occupation_status = COALESCE(?, occupation_status),
            updated_at = ?
        WHERE id = ?
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(sanitize_optional(payload.first_name.as_deref()))
    .bind(sanitize_optional(payload.last_name.as_deref()))
    .bind(payload.zip_code.as_deref().map(str::trim))
    .bind(sanitize_optional(payload.occupation_status.as_deref()))
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(PublicUser::from(user)))
}
