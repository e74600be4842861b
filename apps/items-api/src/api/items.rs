//! Items API routes
//!
//! This module wires up the items domain to HTTP routes.

use axum::Router;
use domain_items::{ItemResult, ItemService, MongoItemRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    let repository = MongoItemRepository::new(&state.db);
    let service = ItemService::new(repository).with_rules(state.config.items);

    handlers::router(service)
}

/// Ensure item indexes exist before serving traffic
pub async fn init_indexes(db: &Database) -> ItemResult<()> {
    MongoItemRepository::new(db).init_indexes().await
}
