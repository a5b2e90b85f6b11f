// src/bin/api_server.rs

use filmorate::infra::{self, config::Config, telemetry};
use filmorate::transport;
use filmorate::Services;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init();

    // --- Storage Initialization ---
    info!(backend = ?config.storage_backend, "initializing storage");
    let storage = infra::open_storage(&config).await?;
    if let Err(e) = storage.ping().await {
        error!(error = %e, "storage is not reachable");
        return Err(e.into());
    }

    let app_state = transport::http::AppState {
        services: Services::new(storage),
        popular_default_count: config.popular_default_count,
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "API server listening (Swagger UI at /swagger-ui)");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
