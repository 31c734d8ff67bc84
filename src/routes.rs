// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handlers::{archetype, auth, film, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quiz, archetypes, film).
/// * Serves static content for every other path.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let origins = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        // Protected account routes
        .merge(
            Router::new()
                .route("/signout", post(auth::signout))
                .route("/me", get(auth::me).put(auth::update_me))
                .layer(require_auth.clone()),
        );

    let quiz_routes = Router::new()
        .route("/start", post(quiz::start_quiz))
        .route("/attempts/{session_id}/answers", post(quiz::answer_question))
        .route("/results", get(quiz::list_results))
        .route("/results/{id}", get(quiz::get_result))
        .route("/{id}/update", put(quiz::update_result))
        .layer(require_auth.clone());

    let archetype_routes = Router::new()
        .route("/", get(archetype::list_profiles))
        .route("/{name}", get(archetype::get_profile));

    let film_routes = Router::new()
        .route("/", get(film::film_access))
        .layer(require_auth);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/archetypes", archetype_routes)
        .nest("/api/film", film_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
