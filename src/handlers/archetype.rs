// src/handlers/archetype.rs

use axum::{Json, extract::Path, response::IntoResponse};

use crate::{engine::Archetype, error::AppError, models::archetype_profile::ArchetypeProfile};

/// Lists the result profiles of all four archetypes.
pub async fn list_profiles() -> impl IntoResponse {
    Json(ArchetypeProfile::all())
}

/// Retrieves one archetype's profile by name (case-insensitive).
pub async fn get_profile(Path(name): Path<String>) -> Result<impl IntoResponse, AppError> {
    let archetype = name
        .parse::<Archetype>()
        .map_err(|_| AppError::NotFound(format!("Unknown archetype '{}'", name)))?;

    Ok(Json(ArchetypeProfile::for_archetype(archetype)))
}
