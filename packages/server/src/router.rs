//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{caregivers, health, records, settings, AppState},
    storage::Storage,
};

/// Build the complete application router with shared state.
///
/// CORS is fully permissive: the web frontend is served from a different
/// origin and the API carries no credentials.
pub fn build_router(storage: Arc<dyn Storage>) -> Router {
    let state = AppState { storage };

    Router::new()
        .route("/health", get(health::health))
        // Caregivers
        .route("/api/caregivers/login", post(caregivers::login))
        // Records
        .route("/api/records", get(records::list).post(records::create))
        .route(
            "/api/records/{id}",
            get(records::get_by_id)
                .put(records::update)
                .delete(records::delete),
        )
        // Settings
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
