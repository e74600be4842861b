//! API routes module
//!
//! All routes are mounted at the root; `axum_helpers::create_router` adds
//! docs, fallback and middleware around them.

pub mod health;
pub mod items;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app.clone()))
}
