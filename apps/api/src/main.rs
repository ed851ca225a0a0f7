use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use jornada_api::api::{self, AppState};
use jornada_api::config::{AppConfig, StorageBackend};
use jornada_api::infrastructure::database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    let state = match config.storage {
        StorageBackend::Postgres => {
            let pool = database::connect(&config.database).await?;
            database::migrate(&pool).await?;
            AppState::postgres(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data will not survive a restart");
            AppState::in_memory()
        }
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
