use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use censo_core::config::LayeredConfig;
use censo_store::memory::MemoryCensusStore;
use censo_store::ports::CensusStore;
use censo_store::postgres::{PostgresConfig, PostgresStore};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use censo_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "censo_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    let settings = LayeredConfig::load(config.config_path.as_deref())
        .context("Failed to load census map settings")?;

    tracing::info!(
        port = config.port,
        tracker_id = settings.tracker_id.value,
        rejected_status = %settings.rejected_status.value,
        postgres = config.uses_postgres(),
        "Starting census map server"
    );

    for (key, (value, source)) in settings.to_inspection_map() {
        tracing::debug!(key = %key, value = %value, source = ?source, "Census map setting");
    }

    // Initialize storage backend based on DATABASE_URL environment variable
    let store: Arc<dyn CensusStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
            match init_postgres_storage(database_url).await {
                Ok(store) => {
                    tracing::info!("Connected to PostgreSQL");
                    store
                }
                Err(e) => {
                    tracing::error!("Failed to connect to PostgreSQL: {:#}", e);
                    tracing::error!(
                        "Remediation:\n\
                        1. Ensure PostgreSQL is running\n\
                        2. Verify DATABASE_URL points at the tracker database\n\
                        3. Check that the configured user can read projects and issues"
                    );
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::info!("Using in-memory storage (set DATABASE_URL for PostgreSQL)");
            Arc::new(MemoryCensusStore::new())
        }
    };

    let state = Arc::new(AppState::new(store, settings).context("Invalid map settings")?);

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CENSO_CORS_ORIGIN: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize PostgreSQL storage from a database URL
async fn init_postgres_storage(database_url: &str) -> anyhow::Result<Arc<dyn CensusStore>> {
    let config = PostgresConfig::from_database_url(database_url)
        .and_then(PostgresConfig::with_env_overrides)
        .context("Invalid database configuration")?;

    let store = PostgresStore::new(config).await.context("Connection failed")?;
    Ok(Arc::new(store))
}
