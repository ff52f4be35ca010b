//! Entry point: load config, wire dependencies, and run the server.

use myflix::auth::TokenService;
use myflix::config::Config;
use myflix::db;
use myflix::models::seed_catalog;
use myflix::repositories::PgStore;
use myflix::{create_server, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let tokens = TokenService::new(&config.jwt_secret)?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            let seeded = db::movies_seed(&pool, &seed_catalog()).await?;
            tracing::info!(seeded, "database ready");
            let store = Arc::new(PgStore::new(pool));
            AppState::new(store.clone(), store, tokens)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::in_memory(tokens)
        }
    };

    let app = create_server(state, &config);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
