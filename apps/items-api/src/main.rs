use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        url = %config.mongodb.redacted_url(),
        database = config.mongodb.database(),
        "Connecting to MongoDB"
    );

    // Startup fails (non-zero exit) once retries are exhausted
    let mongo_client = database::mongodb::connect_from_config_with_retry(&config.mongodb, None)
        .await
        .wrap_err("Failed to connect to MongoDB")?;

    let db = mongo_client.database(config.mongodb.database());
    info!(database = db.name(), "Connected to MongoDB");

    api::items::init_indexes(&db)
        .await
        .wrap_err("Failed to create item indexes")?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state))?;

    info!(
        shutdown_timeout = ?state.config.server.shutdown_timeout,
        "Starting Items API"
    );

    let client = state.mongo_client.clone();
    create_production_app(router, &state.config.server, async move {
        info!("Shutting down: closing MongoDB connections");
        client.shutdown().await;
        info!("MongoDB connection closed successfully");
    })
    .await
    .wrap_err("Server error")?;

    info!("Items API shutdown complete");
    Ok(())
}
