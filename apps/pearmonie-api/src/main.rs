use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::connect_from_config_with_retry;
use pearmonie_api::{build_app, config::Config, state::AppState};
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = match config.database.clone() {
        Some(pg_config) => {
            let db = connect_from_config_with_retry(pg_config, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            domain_users::init_schema(&db).await?;
            domain_products::init_schema(&db).await?;
            info!("Database schema ready");
            Some(db)
        }
        None => {
            warn!("DATABASE_URL is not set, using in-memory storage; data is lost on restart");
            None
        }
    };

    let state = AppState::new(config, db);
    let app = build_app(&state);
    let server = state.config.server.clone();

    info!(
        environment = state.config.environment.as_str(),
        "Starting Pearmonie API (30s graceful shutdown)"
    );

    create_production_app(app, &server, Duration::from_secs(30), async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Pearmonie API shutdown complete");
    Ok(())
}
