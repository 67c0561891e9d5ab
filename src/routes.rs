// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::comment, openapi::openapi_json, state::AppState};

/// Assembles the main application router.
///
/// * Mounts the comment resource and the OpenAPI document.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (comment store, configuration).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/comments",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/comments/{id}",
            put(comment::update_comment).delete(comment::delete_comment),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
